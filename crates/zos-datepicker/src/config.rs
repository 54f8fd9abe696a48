//! Construction-time picker configuration
//!
//! The configuration is immutable once a picker is built. It is validated
//! exactly once, so a bad `minuteIncrement` surfaces at setup instead of
//! producing a broken minute wheel later.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PickerError, PickerResult};
use crate::view_mode::Mode;

/// Minutes in an hour; `minute_increment` must divide it
const MINUTES_PER_HOUR: u32 = 60;

/// Picker configuration supplied by the host
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Which editors the widget offers
    pub mode: Mode,
    /// Weekday the grid starts on (0 = Sunday)
    pub first_day_of_week: u8,
    /// Step between minute wheel rows
    pub minute_increment: u32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Datetime,
            first_day_of_week: 0,
            minute_increment: 1,
        }
    }
}

impl PickerConfig {
    /// Check the configuration contract
    pub fn validate(&self) -> PickerResult<()> {
        if self.minute_increment == 0 || MINUTES_PER_HOUR % self.minute_increment != 0 {
            warn!(increment = self.minute_increment, "rejecting minute increment");
            return Err(PickerError::InvalidMinuteIncrement(self.minute_increment));
        }
        if self.first_day_of_week > 6 {
            warn!(day = self.first_day_of_week, "rejecting first day of week");
            return Err(PickerError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }
        Ok(())
    }

    /// Parse a JSON configuration and validate it
    pub fn from_json(json: &str) -> PickerResult<Self> {
        let config: PickerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style mode override
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style first weekday override
    pub fn with_first_day_of_week(mut self, day: u8) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// Builder-style minute step override
    pub fn with_minute_increment(mut self, increment: u32) -> Self {
        self.minute_increment = increment;
        self
    }
}
