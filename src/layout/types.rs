//! Data structures produced by board composition.

use chrono::NaiveDate;
use serde::Serialize;

use crate::merge::Block;
use crate::model::{EventDisplay, OverlayKind, Resource};
use crate::window::Granularity;

/// What a cell shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellKind {
    Event {
        event_id: String,
        display: EventDisplay,
        /// The event's first slot was taken by a later event; this cell is its visible tail.
        continued: bool,
    },
    Overlay {
        overlay: OverlayKind,
    },
    Empty,
}

impl CellKind {
    pub fn tag(&self) -> &'static str {
        match self {
            CellKind::Event { .. } => "event",
            CellKind::Overlay { .. } => "overlay",
            CellKind::Empty => "empty",
        }
    }
}

/// One vertically positioned cell of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellDescriptor {
    pub slot_index: usize,
    pub span_slots: usize,
    pub top_px: u32,
    pub span_px: u32,
    #[serde(flatten)]
    pub kind: CellKind,
}

/// A resource's column, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub resource: Resource,
    pub cells: Vec<CellDescriptor>,
    /// Not-available blocks merged from the grid, whether or not they were drawn
    pub blocks: Vec<Block>,
    pub event_count: usize,
    pub height_px: u32,
}

impl Column {
    /// Total slots covered by all cells.
    pub fn covered_slots(&self) -> usize {
        self.cells.iter().map(|c| c.span_slots).sum()
    }
}

/// Slot boundary label in the time-axis gutter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GutterLabel {
    pub slot_index: usize,
    pub top_px: u32,
    pub label: String,
    /// Half-hour boundaries are drawn dashed
    pub minor: bool,
}

/// Horizontal "current time" line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowMarker {
    pub offset_px: f64,
    pub label: String,
}

/// The complete layout of one board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardLayout {
    pub date: NaiveDate,
    pub granularity: Granularity,
    pub columns: Vec<Column>,
    pub gutter: Vec<GutterLabel>,
    pub now_marker: Option<NowMarker>,
    /// Appointments across every supplied resource, filtered or not
    pub total_events: usize,
    pub cell_height_px: u32,
    pub height_px: u32,
}
