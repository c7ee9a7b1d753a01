//! Board configuration and wall-clock/slot arithmetic.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one slot")]
    NoSlots,
    #[error("Slot duration must be positive")]
    ZeroDuration,
    #[error("Cell height must be positive")]
    ZeroCellHeight,
    #[error("Invalid window start hour: {0}")]
    InvalidStartHour(u32),
    #[error("Window of {slots} x {minutes} min starting at {hour}:00 runs past midnight")]
    PastMidnight { slots: usize, minutes: u32, hour: u32 },
    #[error("Time {0} is not on a slot boundary")]
    Unaligned(NaiveTime),
    #[error("Time range {start} - {end} is outside the visible window")]
    OutsideWindow { start: NaiveTime, end: NaiveTime },
    #[error("Time range {start} - {end} is empty")]
    EmptyRange { start: NaiveTime, end: NaiveTime },
    #[error("Board of {slots} x {cell_height_px} px rows is too tall")]
    TooTall { slots: usize, cell_height_px: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub total_slots: usize,
    pub slot_duration_minutes: u32,
    pub window_start_hour: u32,
    /// Empty slots at or below this index never join a not-available block.
    pub overlay_start_threshold: usize,
    pub cell_height_px: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            total_slots: 16,
            slot_duration_minutes: 30,
            window_start_hour: 9,
            overlay_start_threshold: 5,
            cell_height_px: 48,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_slots == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.slot_duration_minutes == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.cell_height_px == 0 {
            return Err(ConfigError::ZeroCellHeight);
        }
        if self.window_start_hour >= 24 {
            return Err(ConfigError::InvalidStartHour(self.window_start_hour));
        }

        let window_minutes = (self.total_slots as u64).saturating_mul(self.slot_duration_minutes as u64);
        if (self.window_start_hour as u64 * 60).saturating_add(window_minutes) > 24 * 60 {
            return Err(ConfigError::PastMidnight {
                slots: self.total_slots,
                minutes: self.slot_duration_minutes,
                hour: self.window_start_hour,
            });
        }
        if (self.total_slots as u64).saturating_mul(self.cell_height_px as u64) > u32::MAX as u64 {
            return Err(ConfigError::TooTall {
                slots: self.total_slots,
                cell_height_px: self.cell_height_px,
            });
        }
        Ok(())
    }

    pub fn window_start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.window_start_hour, 0, 0).unwrap_or_default()
    }

    /// Minutes from the window start to its end.
    pub fn window_minutes(&self) -> i64 {
        self.total_slots as i64 * self.slot_duration_minutes as i64
    }

    /// Wall-clock time at which slot `index` begins. `total_slots` itself maps
    /// to the window end; anything past it is `None`.
    pub fn slot_time(&self, index: usize) -> Option<NaiveTime> {
        if index > self.total_slots {
            return None;
        }
        let minutes = i64::try_from(index)
            .ok()?
            .checked_mul(self.slot_duration_minutes as i64)?;
        let offset = Duration::try_minutes(minutes)?;
        Some(self.window_start().overflowing_add_signed(offset).0)
    }

    /// Pixel height of `slots` consecutive cells.
    pub fn span_px(&self, slots: usize) -> u32 {
        slots as u32 * self.cell_height_px
    }

    pub fn board_height_px(&self) -> u32 {
        self.span_px(self.total_slots)
    }

    /// Minutes elapsed since the window start, if `time` lies inside the window.
    pub fn minutes_into_window(&self, time: NaiveTime) -> Option<i64> {
        let minutes = (time - self.window_start()).num_minutes();
        (0..self.window_minutes()).contains(&minutes).then_some(minutes)
    }

    /// Convert a wall-clock range `[start, end)` into an inclusive slot range.
    ///
    /// A 09:00 - 10:00 appointment on a 30-minute grid starting at 9 covers
    /// slots 0 and 1.
    pub fn slot_range(&self, start: NaiveTime, end: NaiveTime) -> Result<(usize, usize), ConfigError> {
        if end <= start {
            return Err(ConfigError::EmptyRange { start, end });
        }
        let duration = self.slot_duration_minutes as i64;
        let start_minutes = (start - self.window_start()).num_minutes();
        let end_minutes = (end - self.window_start()).num_minutes();

        if start_minutes < 0 || end_minutes > self.window_minutes() {
            return Err(ConfigError::OutsideWindow { start, end });
        }
        if start_minutes % duration != 0 || start.second() != 0 {
            return Err(ConfigError::Unaligned(start));
        }
        if end_minutes % duration != 0 || end.second() != 0 {
            return Err(ConfigError::Unaligned(end));
        }

        let first = (start_minutes / duration) as usize;
        let last = (end_minutes / duration) as usize - 1;
        Ok((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.board_height_px(), 16 * 48);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = BoardConfig { total_slots: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoSlots));

        let config = BoardConfig { slot_duration_minutes: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));

        let config = BoardConfig { cell_height_px: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellHeight));
    }

    #[test]
    fn test_validate_rejects_past_midnight() {
        let config = BoardConfig { window_start_hour: 20, total_slots: 10, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::PastMidnight { .. })));

        let config = BoardConfig { total_slots: usize::MAX, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::PastMidnight { .. })));

        // 16:00 + 16 x 30 min ends exactly at midnight
        let config = BoardConfig { window_start_hour: 16, ..Default::default() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_slot_time() {
        let config = BoardConfig::default();
        assert_eq!(config.slot_time(0), Some(t(9, 0)));
        assert_eq!(config.slot_time(1), Some(t(9, 30)));
        assert_eq!(config.slot_time(15), Some(t(16, 30)));
        assert_eq!(config.slot_time(16), Some(t(17, 0)));
    }

    #[test]
    fn test_slot_time_past_window() {
        let config = BoardConfig::default();
        assert_eq!(config.slot_time(17), None);
        assert_eq!(config.slot_time(10_000_000_000_000_000), None);
        assert_eq!(config.slot_time(usize::MAX), None);

        // Unvalidated configs must not overflow either
        let config = BoardConfig {
            total_slots: usize::MAX,
            slot_duration_minutes: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.slot_time(usize::MAX), None);
    }

    #[test]
    fn test_validate_rejects_too_tall() {
        let config = BoardConfig {
            total_slots: 48,
            slot_duration_minutes: 15,
            cell_height_px: 100_000_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooTall {
                slots: 48,
                cell_height_px: 100_000_000
            })
        );

        let config = BoardConfig {
            total_slots: 1,
            cell_height_px: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_slot_range() {
        let config = BoardConfig::default();
        assert_eq!(config.slot_range(t(9, 0), t(10, 0)), Ok((0, 1)));
        assert_eq!(config.slot_range(t(11, 30), t(12, 30)), Ok((5, 6)));
        assert_eq!(config.slot_range(t(16, 30), t(17, 0)), Ok((15, 15)));
    }

    #[test]
    fn test_slot_range_errors() {
        let config = BoardConfig::default();
        assert_eq!(
            config.slot_range(t(9, 15), t(10, 0)),
            Err(ConfigError::Unaligned(t(9, 15)))
        );
        assert!(matches!(
            config.slot_range(t(16, 30), t(17, 30)),
            Err(ConfigError::OutsideWindow { .. })
        ));
        assert!(matches!(
            config.slot_range(t(8, 0), t(9, 30)),
            Err(ConfigError::OutsideWindow { .. })
        ));
        assert!(matches!(
            config.slot_range(t(10, 0), t(10, 0)),
            Err(ConfigError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_minutes_into_window() {
        let config = BoardConfig::default();
        assert_eq!(config.minutes_into_window(t(13, 30)), Some(270));
        assert_eq!(config.minutes_into_window(t(8, 59)), None);
        assert_eq!(config.minutes_into_window(t(17, 0)), None);
    }
}
