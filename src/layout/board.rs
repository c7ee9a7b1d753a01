//! Board-wide pieces: resource filtering, event grouping, gutter and now marker.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::config::BoardConfig;
use crate::model::{Event, Resource};

use super::types::{GutterLabel, NowMarker};

/// Resources to show, in their given order.
pub fn filter_resources<'a>(resources: &'a [Resource], selected: Option<&str>) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| selected.is_none_or(|id| r.id == id))
        .collect()
}

/// Events per resource ID, keeping input order inside each group.
pub fn group_by_resource(events: &[Event]) -> HashMap<&str, Vec<Event>> {
    let mut groups: HashMap<&str, Vec<Event>> = HashMap::new();
    for event in events {
        groups
            .entry(event.resource_id.as_str())
            .or_default()
            .push(event.clone());
    }
    groups
}

/// One label per slot boundary, starting at the window start.
pub fn build_gutter(config: &BoardConfig) -> Vec<GutterLabel> {
    (0..config.total_slots)
        .filter_map(|index| {
            let time = config.slot_time(index)?;
            Some(GutterLabel {
                slot_index: index,
                top_px: config.span_px(index),
                label: time.format("%H:%M").to_string(),
                minor: time.minute() != 0,
            })
        })
        .collect()
}

/// Position of the current-time line, if `now` falls inside the board's window.
pub fn now_marker(config: &BoardConfig, date: NaiveDate, now: NaiveDateTime) -> Option<NowMarker> {
    if now.date() != date {
        return None;
    }
    config.minutes_into_window(now.time())?;

    let seconds = (now.time() - config.window_start()).num_seconds() as f64;
    let slot_seconds = config.slot_duration_minutes as f64 * 60.0;

    Some(NowMarker {
        offset_px: seconds / slot_seconds * config.cell_height_px as f64,
        label: now.format("%H:%M").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    #[test]
    fn test_filter_keeps_order() {
        let resources = vec![
            Resource::new("1", "Dr. Martínez"),
            Resource::new("2", "Dra. Rodríguez"),
            Resource::new("3", "Dr. García"),
        ];
        let all: Vec<&str> = filter_resources(&resources, None)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(all, vec!["1", "2", "3"]);

        let one = filter_resources(&resources, Some("2"));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "Dra. Rodríguez");

        assert!(filter_resources(&resources, Some("9")).is_empty());
    }

    #[test]
    fn test_group_by_resource() {
        let events = vec![
            Event::new("b", "2", 3, 3),
            Event::new("a", "1", 0, 1),
            Event::new("c", "2", 1, 1),
        ];
        let groups = group_by_resource(&events);
        let ids: Vec<&str> = groups["2"].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(groups["1"].len(), 1);
    }

    #[test]
    fn test_gutter_labels() {
        let gutter = build_gutter(&BoardConfig::default());
        assert_eq!(gutter.len(), 16);
        assert_eq!(gutter[0].label, "09:00");
        assert!(!gutter[0].minor);
        assert_eq!(gutter[1].label, "09:30");
        assert!(gutter[1].minor);
        assert_eq!(gutter[15].label, "16:30");
        assert_eq!(gutter[15].top_px, 15 * 48);
    }

    #[test]
    fn test_now_marker_inside_window() {
        let now = date().and_hms_opt(13, 30, 0).unwrap();
        let marker = now_marker(&BoardConfig::default(), date(), now).unwrap();
        // 4.5 hours = 9 slots of 48px
        assert_eq!(marker.offset_px, 432.0);
        assert_eq!(marker.label, "13:30");
    }

    #[test]
    fn test_now_marker_between_slots() {
        let now = date().and_hms_opt(9, 15, 0).unwrap();
        let marker = now_marker(&BoardConfig::default(), date(), now).unwrap();
        assert_eq!(marker.offset_px, 24.0);
    }

    #[test]
    fn test_now_marker_outside_window() {
        let config = BoardConfig::default();
        assert!(now_marker(&config, date(), date().and_hms_opt(8, 59, 0).unwrap()).is_none());
        assert!(now_marker(&config, date(), date().and_hms_opt(17, 0, 0).unwrap()).is_none());

        let other_day = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
        assert!(now_marker(&config, other_day, date().and_hms_opt(10, 0, 0).unwrap()).is_none());
    }
}
