//! The three scroll wheels and their typed commit paths

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calendar::{Meridiem, SelectedDate};
use crate::config::PickerConfig;

/// First row of the year wheel
pub const FIRST_YEAR: i32 = 1900;

/// Last row of the year wheel
pub const LAST_YEAR: i32 = 2100;

/// Identifies one wheel; the wire names are the setter each wheel commits through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WheelKey {
    #[serde(rename = "setHours")]
    Hours,
    #[serde(rename = "setMinutes")]
    Minutes,
    #[serde(rename = "setYear")]
    Year,
}

impl WheelKey {
    pub const ALL: [WheelKey; 3] = [WheelKey::Hours, WheelKey::Minutes, WheelKey::Year];

    /// Wire name
    pub fn method_name(self) -> &'static str {
        match self {
            WheelKey::Hours => "setHours",
            WheelKey::Minutes => "setMinutes",
            WheelKey::Year => "setYear",
        }
    }

    /// CSS selector of the rendered wheel
    pub fn selector(self) -> &'static str {
        match self {
            WheelKey::Hours => ".clock .hours",
            WheelKey::Minutes => ".clock .minutes",
            WheelKey::Year => ".years",
        }
    }

    /// The value this wheel should show for `date` (hours in 24-hour form)
    pub fn current_value(self, date: &SelectedDate) -> i32 {
        match self {
            WheelKey::Hours => date.hour() as i32,
            WheelKey::Minutes => date.minute() as i32,
            WheelKey::Year => date.year(),
        }
    }

    /// Row holding `value`, before clamping to the rendered row count.
    ///
    /// The hour wheel lists `12, 1, .., 11`, so afternoon hours fold onto the
    /// same rows as morning ones.
    pub fn row_index(self, value: i32, meridiem: Meridiem, minute_increment: u32) -> i64 {
        match self {
            WheelKey::Year => i64::from(value) - i64::from(FIRST_YEAR),
            WheelKey::Hours if meridiem == Meridiem::Pm && value >= 12 => i64::from(value) - 12,
            WheelKey::Hours => i64::from(value),
            WheelKey::Minutes => i64::from(value) / i64::from(minute_increment.max(1)),
        }
    }

    /// Row labels in display order
    pub fn rows(self, minute_increment: u32) -> Vec<i32> {
        match self {
            WheelKey::Hours => std::iter::once(12).chain(1..12).collect(),
            WheelKey::Minutes => (0..60).step_by(minute_increment.max(1) as usize).collect(),
            WheelKey::Year => (FIRST_YEAR..=LAST_YEAR).collect(),
        }
    }

    /// Row labels for a picker built from `config`
    pub fn rows_for(self, config: &PickerConfig) -> Vec<i32> {
        self.rows(config.minute_increment)
    }

    /// Write a settled row label into `date`.
    ///
    /// Hour labels are 12-hour and are mapped through the date's current
    /// meridiem. Returns the committed value, or `None` if the label cannot
    /// belong to this wheel.
    pub fn commit(self, date: &mut SelectedDate, label: i32) -> Option<i32> {
        match self {
            WheelKey::Hours => {
                if !(1..=12).contains(&label) {
                    warn!(label, "ignoring hour label outside 1..=12");
                    return None;
                }
                let hour = date.meridiem().to_24_hour(label as u32);
                date.set_hours(hour);
                Some(hour as i32)
            }
            WheelKey::Minutes => {
                if !(0..60).contains(&label) {
                    warn!(label, "ignoring minute label outside 0..60");
                    return None;
                }
                date.set_minutes(label as u32);
                Some(label)
            }
            WheelKey::Year => {
                date.set_full_year(label);
                Some(label)
            }
        }
    }
}

impl std::fmt::Display for WheelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method_name())
    }
}
