use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display fields carried by an appointment. The layout never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDisplay {
    /// Patient name
    pub title: String,
    /// Treatment
    pub category: String,
    pub status: String,
    pub color: String,
    pub start_label: String,
    pub end_label: String,
}

/// One scheduled occupancy of a doctor's column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub resource_id: String,
    pub start_slot: usize,
    /// Inclusive
    pub end_slot: usize,
    #[serde(default)]
    pub display: EventDisplay,
}

impl Event {
    pub fn new(id: &str, resource_id: &str, start_slot: usize, end_slot: usize) -> Self {
        Self {
            id: id.to_string(),
            resource_id: resource_id.to_string(),
            start_slot,
            end_slot,
            display: EventDisplay::default(),
        }
    }

    pub fn with_display(mut self, display: EventDisplay) -> Self {
        self.display = display;
        self
    }
}

/// A doctor owning one column of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub appointment_count: u32,
    #[serde(default)]
    pub patient_count: u32,
}

impl Resource {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            appointment_count: 0,
            patient_count: 0,
        }
    }

    /// First character of the display name, used as avatar text.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    NotAvailable,
    Break,
    WaitingPayment,
    ActionButton,
}

impl OverlayKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_available" => Some(Self::NotAvailable),
            "break" => Some(Self::Break),
            "waiting_payment" => Some(Self::WaitingPayment),
            "action_button" => Some(Self::ActionButton),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotAvailable => "not_available",
            Self::Break => "break",
            Self::WaitingPayment => "waiting_payment",
            Self::ActionButton => "action_button",
        }
    }
}

/// Which overlays a column is allowed to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayFlags {
    pub show_not_available: bool,
    pub show_break: bool,
    pub show_waiting_payment: bool,
    pub show_action_button: bool,
}

impl OverlayFlags {
    pub fn allows(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::NotAvailable => self.show_not_available,
            OverlayKind::Break => self.show_break,
            OverlayKind::WaitingPayment => self.show_waiting_payment,
            OverlayKind::ActionButton => self.show_action_button,
        }
    }
}

/// A one-slot presentation marker placed at a fixed index of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayMarker {
    pub resource_id: String,
    pub slot_index: usize,
    pub kind: OverlayKind,
}

impl OverlayMarker {
    pub fn new(resource_id: &str, slot_index: usize, kind: OverlayKind) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            slot_index,
            kind,
        }
    }
}

/// Flags and markers for a single column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOverlays {
    pub flags: OverlayFlags,
    pub markers: Vec<OverlayMarker>,
}

/// Overlay settings for a whole board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOverlays {
    /// Resource ID -> flags. Missing resources show no overlays.
    pub flags: HashMap<String, OverlayFlags>,
    pub markers: Vec<OverlayMarker>,
}

impl BoardOverlays {
    pub fn for_resource(&self, resource_id: &str) -> ColumnOverlays {
        ColumnOverlays {
            flags: self.flags.get(resource_id).copied().unwrap_or_default(),
            markers: self
                .markers
                .iter()
                .filter(|m| m.resource_id == resource_id)
                .cloned()
                .collect(),
        }
    }
}
