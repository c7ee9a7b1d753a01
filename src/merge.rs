//! Merging runs of empty slots into overlay blocks.

use serde::Serialize;

use crate::grid::SlotGrid;

/// A maximal run of empty slots, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Block {
    pub start_index: usize,
    pub end_index: usize,
}

impl Block {
    pub fn slot_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Collect maximal runs of empty slots whose index is above `threshold`.
///
/// Blocks come out sorted by start index and never overlap.
pub fn merge_gaps(grid: &SlotGrid, threshold: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (index, slot) in grid.slots().iter().enumerate() {
        if index > threshold && slot.is_empty() {
            match current.as_mut() {
                Some(block) => block.end_index = index,
                None => {
                    current = Some(Block {
                        start_index: index,
                        end_index: index,
                    })
                }
            }
        } else if let Some(block) = current.take() {
            blocks.push(block);
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    tracing::trace!(threshold, blocks = blocks.len(), "merged empty slots");
    blocks
}

/// Remembers the last block list so callers can skip redundant re-layout.
#[derive(Debug, Clone, Default)]
pub struct BlockMemo {
    blocks: Vec<Block>,
}

impl BlockMemo {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Store `blocks` if they differ by value from the remembered list.
    /// Returns whether anything changed.
    pub fn refresh(&mut self, blocks: Vec<Block>) -> bool {
        if self.blocks == blocks {
            return false;
        }
        self.blocks = blocks;
        true
    }
}
