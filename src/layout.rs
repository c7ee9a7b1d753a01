//! Day board layout: columns of cells beside a shared time gutter.

mod board;
mod column;
mod engine;
mod types;

pub use board::{build_gutter, filter_resources, group_by_resource, now_marker};
pub use column::render_column;
pub use engine::{BoardEngine, BoardError, compose_board};
pub use types::{BoardLayout, CellDescriptor, CellKind, Column, GutterLabel, NowMarker};
