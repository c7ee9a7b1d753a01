//! The caller-owned viewing window: date, doctor filter and granularity.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Some(Self::Day),
            "week" | "weekly" => Some(Self::Week),
            "month" | "monthly" => Some(Self::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewWindow {
    pub date: NaiveDate,
    pub granularity: Granularity,
    /// Show only this resource's column
    pub selected_resource: Option<String>,
}

impl ViewWindow {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            granularity: Granularity::Day,
            selected_resource: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn select_resource(&mut self, resource_id: Option<&str>) {
        self.selected_resource = resource_id.map(str::to_string);
    }

    /// Step forward by one unit of the current granularity.
    pub fn next(&self) -> Self {
        let date = match self.granularity {
            Granularity::Day => self.date.checked_add_days(Days::new(1)),
            Granularity::Week => self.date.checked_add_days(Days::new(7)),
            Granularity::Month => self.date.checked_add_months(Months::new(1)),
        };
        self.moved_to(date)
    }

    /// Step back by one unit of the current granularity.
    pub fn previous(&self) -> Self {
        let date = match self.granularity {
            Granularity::Day => self.date.checked_sub_days(Days::new(1)),
            Granularity::Week => self.date.checked_sub_days(Days::new(7)),
            Granularity::Month => self.date.checked_sub_months(Months::new(1)),
        };
        self.moved_to(date)
    }

    pub fn today(&self, clock: &dyn Clock) -> Self {
        self.moved_to(Some(clock.now().date()))
    }

    fn moved_to(&self, date: Option<NaiveDate>) -> Self {
        Self {
            date: date.unwrap_or(self.date),
            ..self.clone()
        }
    }

    /// Dates the window covers, in order.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        match self.granularity {
            Granularity::Day => vec![self.date],
            Granularity::Week => {
                let monday = self.date.week(chrono::Weekday::Mon).first_day();
                monday.iter_days().take(7).collect()
            }
            Granularity::Month => {
                let first = self.date.with_day(1).unwrap_or(self.date);
                first
                    .iter_days()
                    .take_while(|d| d.month() == first.month())
                    .collect()
            }
        }
    }
}
