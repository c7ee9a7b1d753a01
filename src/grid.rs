//! Slot grid: one column's appointments projected onto discrete slots.

use crate::model::Event;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Event {id}: start slot {start} is after end slot {end}")]
    InvertedRange { id: String, start: usize, end: usize },
    #[error("Event {id}: end slot {end} is outside a board of {total} slots")]
    OutOfRange { id: String, end: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Empty,
    Occupied { event: &'a Event, is_first: bool },
}

impl<'a> Slot<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// The event whose first slot this is.
    pub fn first_of(&self) -> Option<&'a Event> {
        match *self {
            Slot::Occupied { event, is_first: true } => Some(event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> SlotGrid<'a> {
    pub fn empty(total_slots: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; total_slots],
        }
    }

    pub fn slots(&self) -> &[Slot<'a>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot<'a>> {
        self.slots.get(index)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i)
    }

    /// Events still visible through their first slot.
    pub fn event_count(&self) -> usize {
        self.slots.iter().filter(|s| s.first_of().is_some()).count()
    }
}

/// Check that every event fits inside a board of `total_slots`.
pub fn validate_events(events: &[Event], total_slots: usize) -> Result<(), GridError> {
    for event in events {
        if event.start_slot > event.end_slot {
            return Err(GridError::InvertedRange {
                id: event.id.clone(),
                start: event.start_slot,
                end: event.end_slot,
            });
        }
        if event.end_slot >= total_slots {
            return Err(GridError::OutOfRange {
                id: event.id.clone(),
                end: event.end_slot,
                total: total_slots,
            });
        }
    }
    Ok(())
}

/// Project `events` onto a grid of `total_slots`.
///
/// Events may come in any order. When two events claim the same slot the one
/// later in `events` owns it.
pub fn build_grid(events: &[Event], total_slots: usize) -> Result<SlotGrid<'_>, GridError> {
    validate_events(events, total_slots)?;

    let mut grid = SlotGrid::empty(total_slots);
    for event in events {
        for index in event.start_slot..=event.end_slot {
            grid.slots[index] = Slot::Occupied {
                event,
                is_first: index == event.start_slot,
            };
        }
    }

    tracing::trace!(
        events = events.len(),
        occupied = grid.occupied_count(),
        total_slots,
        "built slot grid"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ<'a>(grid: &SlotGrid<'a>, index: usize) -> Option<(&'a str, bool)> {
        match grid.get(index).copied() {
            Some(Slot::Occupied { event, is_first }) => Some((event.id.as_str(), is_first)),
            _ => None,
        }
    }

    #[test]
    fn test_single_event() {
        let events = vec![Event::new("a", "d1", 1, 2)];
        let grid = build_grid(&events, 4).unwrap();

        assert_eq!(grid.len(), 4);
        assert!(grid.slots()[0].is_empty());
        assert_eq!(occ(&grid, 1), Some(("a", true)));
        assert_eq!(occ(&grid, 2), Some(("a", false)));
        assert!(grid.slots()[3].is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let events = vec![Event::new("first", "d1", 2, 3), Event::new("second", "d1", 3, 4)];
        let grid = build_grid(&events, 6).unwrap();

        assert_eq!(occ(&grid, 2), Some(("first", true)));
        assert_eq!(occ(&grid, 3), Some(("second", true)));
        assert_eq!(occ(&grid, 4), Some(("second", false)));
    }

    #[test]
    fn test_fully_covered_event_disappears() {
        let events = vec![Event::new("short", "d1", 3, 3), Event::new("long", "d1", 2, 4)];
        let grid = build_grid(&events, 6).unwrap();

        assert_eq!(grid.event_count(), 1);
        assert_eq!(occ(&grid, 3), Some(("long", false)));
    }

    #[test]
    fn test_unsorted_input() {
        let events = vec![Event::new("late", "d1", 5, 6), Event::new("early", "d1", 0, 1)];
        let grid = build_grid(&events, 8).unwrap();

        assert_eq!(occ(&grid, 0), Some(("early", true)));
        assert_eq!(occ(&grid, 5), Some(("late", true)));
        assert_eq!(grid.event_count(), 2);
    }

    #[test]
    fn test_empty_events() {
        let grid = build_grid(&[], 8).unwrap();
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.empty_indices().count(), 8);
    }

    #[test]
    fn test_occupied_count_matches_spans() {
        let cases: Vec<Vec<Event>> = vec![
            vec![Event::new("a", "d", 0, 0)],
            vec![Event::new("a", "d", 0, 1), Event::new("b", "d", 5, 6), Event::new("c", "d", 12, 14)],
            vec![Event::new("a", "d", 1, 2), Event::new("b", "d", 6, 7), Event::new("c", "d", 11, 12)],
            vec![Event::new("a", "d", 0, 15)],
            vec![Event::new("a", "d", 14, 15), Event::new("b", "d", 2, 3), Event::new("c", "d", 8, 9)],
        ];

        for events in &cases {
            let grid = build_grid(events, 16).unwrap();
            let expected: usize = events.iter().map(|e| e.end_slot - e.start_slot + 1).sum();
            assert_eq!(grid.occupied_count(), expected);
            assert_eq!(grid.empty_indices().count(), 16 - expected);
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let events = vec![Event::new("ok", "d1", 0, 1), Event::new("bad", "d1", 3, 2)];
        assert_eq!(
            build_grid(&events, 4),
            Err(GridError::InvertedRange {
                id: "bad".into(),
                start: 3,
                end: 2
            })
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let events = vec![Event::new("late", "d1", 14, 16)];
        let err = build_grid(&events, 16).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfRange {
                id: "late".into(),
                end: 16,
                total: 16
            }
        );
        assert!(err.to_string().contains("late"));
    }

    #[test]
    fn test_deterministic() {
        let events = vec![Event::new("a", "d1", 1, 3), Event::new("b", "d1", 3, 5)];
        assert_eq!(build_grid(&events, 8), build_grid(&events, 8));
    }
}
