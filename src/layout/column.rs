//! Turning one resource's grid and blocks into a stack of cells.

use std::collections::HashMap;

use crate::grid::{Slot, SlotGrid};
use crate::merge::Block;
use crate::model::{ColumnOverlays, OverlayKind, Resource};

use super::types::{CellDescriptor, CellKind, Column};

/// Markers this column may show, keyed by slot index.
fn active_markers(resource: &Resource, overlays: &ColumnOverlays) -> HashMap<usize, OverlayKind> {
    overlays
        .markers
        .iter()
        .filter(|m| m.resource_id == resource.id)
        .filter(|m| m.kind != OverlayKind::NotAvailable && overlays.flags.allows(m.kind))
        .map(|m| (m.slot_index, m.kind))
        .collect()
}

/// Length of the visible run of `start`'s event beginning at `start`.
fn event_run(slots: &[Slot], start: usize) -> usize {
    let Slot::Occupied { event: owner, .. } = slots[start] else {
        return 0;
    };
    1 + slots[start + 1..]
        .iter()
        .take_while(|s| match s {
            Slot::Occupied { event, is_first } => !is_first && std::ptr::eq(*event, owner),
            Slot::Empty => false,
        })
        .count()
}

/// Number of consecutive empty slots of `block`, starting at its first index.
fn block_run(slots: &[Slot], block: &Block) -> usize {
    slots[block.start_index..]
        .iter()
        .take(block.slot_count())
        .take_while(|s| s.is_empty())
        .count()
}

/// Render a resource's column.
///
/// Every slot index is covered by exactly one cell. Events win over
/// not-available blocks, which win over markers.
pub fn render_column(
    resource: &Resource,
    grid: &SlotGrid,
    blocks: &[Block],
    overlays: &ColumnOverlays,
    cell_height_px: u32,
) -> Column {
    let slots = grid.slots();
    let markers = active_markers(resource, overlays);
    let drawn_blocks: &[Block] = if overlays.flags.show_not_available {
        blocks
    } else {
        &[]
    };

    let mut cells = Vec::new();
    let mut index = 0;

    while index < slots.len() {
        let (span, kind) = match slots[index] {
            Slot::Occupied { event, is_first } => (
                event_run(slots, index),
                CellKind::Event {
                    event_id: event.id.clone(),
                    display: event.display.clone(),
                    continued: !is_first,
                },
            ),
            Slot::Empty => {
                let block_span = drawn_blocks
                    .iter()
                    .find(|b| b.start_index == index)
                    .map(|b| block_run(slots, b))
                    .filter(|&n| n > 0);

                match (block_span, markers.get(&index)) {
                    (Some(n), _) => (
                        n,
                        CellKind::Overlay {
                            overlay: OverlayKind::NotAvailable,
                        },
                    ),
                    (None, Some(&kind)) => (1, CellKind::Overlay { overlay: kind }),
                    (None, None) => (1, CellKind::Empty),
                }
            }
        };

        cells.push(CellDescriptor {
            slot_index: index,
            span_slots: span,
            top_px: index as u32 * cell_height_px,
            span_px: span as u32 * cell_height_px,
            kind,
        });
        index += span;
    }

    for (&slot_index, kind) in &markers {
        let shown = cells.iter().any(|c| {
            c.slot_index == slot_index
                && matches!(&c.kind, CellKind::Overlay { overlay } if overlay == kind)
        });
        if !shown {
            tracing::debug!(
                resource = %resource.id,
                slot_index,
                kind = kind.name(),
                "marker suppressed"
            );
        }
    }

    Column {
        resource: resource.clone(),
        cells,
        blocks: blocks.to_vec(),
        event_count: grid.event_count(),
        height_px: slots.len() as u32 * cell_height_px,
    }
}
