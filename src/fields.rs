//! Enumerations shared by the CLI, the config file and the calendar.

use chrono::Weekday;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// First column of the calendar grid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WeekStart {
    #[default]
    #[serde(alias = "Sunday")]
    Sunday,
    #[serde(alias = "Monday")]
    Monday,
}

impl WeekStart {
    /// Column index of `day` in a grid starting on this weekday.
    pub fn column_of(self, day: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => day.num_days_from_sunday(),
            WeekStart::Monday => day.num_days_from_monday(),
        }
    }

    /// Two-letter weekday headers in column order.
    pub fn header(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}
