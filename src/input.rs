//! JSON board requests, as sent by the data-access layer.
//!
//! ```json
//! {
//!   "date": "2025-05-16",
//!   "resources": [{ "id": "1", "name": "Dr. Martínez" }],
//!   "appointments": [
//!     { "id": "1", "resource_id": "1", "start_time": "09:00", "end_time": "10:00",
//!       "title": "María López", "category": "Revisión General", "color": "pink" }
//!   ]
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::config::{BoardConfig, ConfigError};
use crate::model::{BoardOverlays, Event, EventDisplay, Resource};
use crate::window::{Granularity, ViewWindow};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid time: {0}")]
    InvalidTime(String),
    #[error("Invalid view: {0}")]
    InvalidView(String),
    #[error("Appointment {0} needs start_slot/end_slot or start_time/end_time")]
    MissingRange(String),
    #[error("Appointment {id}: {source}")]
    Range {
        id: String,
        #[source]
        source: ConfigError,
    },
    #[error("Invalid board config: {0}")]
    Config(#[from] ConfigError),
}

/// One appointment as delivered by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub resource_id: String,
    pub start_slot: Option<usize>,
    pub end_slot: Option<usize>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoardRequest {
    #[serde(default)]
    pub config: BoardConfig,
    pub date: String,
    pub view: Option<String>,
    pub selected_resource: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
    #[serde(default)]
    pub overlays: BoardOverlays,
    /// Pins the current time, `YYYY-MM-DDTHH:MM[:SS]`
    pub now: Option<String>,
}

pub fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| InputError::InvalidDate(s.to_string()))
}

pub fn parse_time(s: &str) -> Result<NaiveTime, InputError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| InputError::InvalidTime(s.to_string()))
}

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, InputError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| InputError::InvalidTime(s.to_string()))
}

impl AppointmentRecord {
    /// Resolve the slot range and display labels against `config`.
    pub fn to_event(&self, config: &BoardConfig) -> Result<Event, InputError> {
        let (start_slot, end_slot) = match (self.start_slot, self.end_slot, &self.start_time, &self.end_time) {
            (Some(start), Some(end), _, _) => (start, end),
            (_, _, Some(start), Some(end)) => config
                .slot_range(parse_time(start)?, parse_time(end)?)
                .map_err(|source| InputError::Range {
                    id: self.id.clone(),
                    source,
                })?,
            _ => return Err(InputError::MissingRange(self.id.clone())),
        };

        // Ranges that do not fit get no derived labels; the grid rejects them by id.
        let fits = start_slot <= end_slot && end_slot < config.total_slots;
        let label = |given: &Option<String>, slot: usize| match given {
            Some(text) => text.clone(),
            None => fits
                .then(|| config.slot_time(slot))
                .flatten()
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_default(),
        };

        Ok(Event {
            id: self.id.clone(),
            resource_id: self.resource_id.clone(),
            start_slot,
            end_slot,
            display: EventDisplay {
                title: self.title.clone(),
                category: self.category.clone(),
                status: self.status.clone(),
                color: self.color.clone(),
                start_label: label(&self.start_time, start_slot),
                end_label: label(&self.end_time, end_slot.saturating_add(1)),
            },
        })
    }
}

impl BoardRequest {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn window(&self) -> Result<ViewWindow, InputError> {
        let granularity = match &self.view {
            Some(v) => Granularity::from_str(v).ok_or_else(|| InputError::InvalidView(v.clone()))?,
            None => Granularity::Day,
        };
        let mut window = ViewWindow::new(parse_date(&self.date)?).with_granularity(granularity);
        window.select_resource(self.selected_resource.as_deref());
        Ok(window)
    }

    pub fn events(&self) -> Result<Vec<Event>, InputError> {
        self.config.validate()?;
        self.appointments
            .iter()
            .map(|a| a.to_event(&self.config))
            .collect()
    }

    pub fn pinned_now(&self) -> Result<Option<NaiveDateTime>, InputError> {
        self.now.as_deref().map(parse_datetime).transpose()
    }
}
