//! The selected date-time and its 12-hour clock view

use std::ops::RangeInclusive;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::grid::days_in_month;
use crate::error::{PickerError, PickerResult};

/// Half of the day on a 12-hour clock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    /// 00:00 to 11:59
    Am,
    /// 12:00 to 23:59
    Pm,
}

impl Meridiem {
    /// Meridiem of a 24-hour value
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    /// Wire/display form
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }

    /// Map a 12-hour wheel label (1..=12) back to 24-hour form.
    pub fn to_24_hour(self, shown: u32) -> u32 {
        match (self, shown) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full years a [`SelectedDate`] can hold
pub fn representable_years() -> RangeInclusive<i32> {
    NaiveDate::MIN.year()..=NaiveDate::MAX.year()
}

/// 12-hour label for a 24-hour value (0 and 12 both show as 12)
pub fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// The single date-time value the widget edits.
///
/// Mutated in place by the commit paths. Setters never fail: values that
/// cannot be represented are logged and ignored, and a day that does not
/// exist in the target month is clamped to the month's last day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedDate(NaiveDateTime);

impl SelectedDate {
    /// Wrap an existing date-time
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Current local time, truncated to the minute
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        let minute = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now.time());
        Self(now.date().and_time(minute))
    }

    /// Build from components; `month` is zero-based.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> PickerResult<Self> {
        NaiveDate::from_ymd_opt(year, month + 1, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
            .ok_or(PickerError::InvalidDate { year, month, day })
    }

    /// Underlying chrono value
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Full year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month (0 = January)
    pub fn month(&self) -> u32 {
        self.0.month0()
    }

    /// Day of month
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour in 24-hour form
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Day of week
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Whether the hour is before or after noon
    pub fn meridiem(&self) -> Meridiem {
        Meridiem::from_hour(self.hour())
    }

    /// Hour as shown on the 12-hour wheel
    pub fn twelve_hour(&self) -> u32 {
        twelve_hour(self.hour())
    }

    /// Set the hour (0..=23), keeping everything else
    pub fn set_hours(&mut self, hour: u32) {
        match self.0.with_hour(hour) {
            Some(value) => self.0 = value,
            None => warn!(hour, "ignoring out-of-range hour"),
        }
    }

    /// Set the minute (0..=59), keeping everything else
    pub fn set_minutes(&mut self, minute: u32) {
        match self.0.with_minute(minute) {
            Some(value) => self.0 = value,
            None => warn!(minute, "ignoring out-of-range minute"),
        }
    }

    /// Set the year, clamping Feb 29 in non-leap years
    pub fn set_full_year(&mut self, year: i32) {
        self.rebuild(year, self.month(), self.day());
    }

    /// Set year and zero-based month together, clamping the day
    pub fn set_year_month(&mut self, year: i32, month: u32) {
        if month > 11 {
            warn!(month, "ignoring out-of-range month");
            return;
        }
        self.rebuild(year, month, self.day());
    }

    /// Set the day of month; days the month does not have are ignored
    pub fn set_day(&mut self, day: u32) {
        let last = days_in_month(self.year(), self.month());
        if day == 0 || day > last {
            warn!(day, last, "ignoring day outside month");
            return;
        }
        self.rebuild(self.year(), self.month(), day);
    }

    /// Move the hour into the requested half of the day, keeping the minute
    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        let hour = self.hour();
        match meridiem {
            Meridiem::Pm if hour < 12 => self.set_hours(hour + 12),
            Meridiem::Am if hour >= 12 => self.set_hours(hour - 12),
            _ => {}
        }
    }

    fn rebuild(&mut self, year: i32, month: u32, day: u32) {
        let day = day.min(days_in_month(year, month));
        match NaiveDate::from_ymd_opt(year, month + 1, day) {
            Some(date) => self.0 = date.and_time(self.0.time()),
            None => warn!(year, month, day, "ignoring unrepresentable date"),
        }
    }
}

impl From<NaiveDateTime> for SelectedDate {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> SelectedDate {
        SelectedDate::from_parts(year, month, day, hour, minute).unwrap()
    }

    #[test]
    fn test_components_are_zero_based_month() {
        let d = date(2023, 5, 15, 14, 5);
        assert_eq!(d.year(), 2023);
        assert_eq!(d.month(), 5);
        assert_eq!(d.day(), 15);
        assert_eq!(d.hour(), 14);
        assert_eq!(d.minute(), 5);
        assert_eq!(d.weekday(), Weekday::Thu);
        assert_eq!(d.meridiem(), Meridiem::Pm);
        assert_eq!(d.twelve_hour(), 2);
    }

    #[test]
    fn test_from_parts_rejects_impossible_date() {
        let err = SelectedDate::from_parts(2023, 1, 30, 0, 0).unwrap_err();
        assert_eq!(
            err,
            PickerError::InvalidDate {
                year: 2023,
                month: 1,
                day: 30
            }
        );
    }

    #[test]
    fn test_set_full_year_clamps_leap_day() {
        let mut d = date(2024, 1, 29, 9, 30);
        d.set_full_year(2023);
        assert_eq!((d.year(), d.month(), d.day()), (2023, 1, 28));
        assert_eq!((d.hour(), d.minute()), (9, 30));
    }

    #[test]
    fn test_set_year_month_clamps_day() {
        let mut d = date(2023, 0, 31, 8, 0);
        d.set_year_month(2023, 3);
        assert_eq!((d.month(), d.day()), (3, 30));
    }

    #[test]
    fn test_invalid_setters_are_ignored() {
        let mut d = date(2023, 3, 10, 8, 15);
        d.set_hours(24);
        d.set_minutes(60);
        d.set_day(31);
        d.set_year_month(2023, 12);
        assert_eq!(d, date(2023, 3, 10, 8, 15));
    }

    #[test]
    fn test_meridiem_flip_edges() {
        let mut d = date(2023, 0, 1, 0, 45);
        d.set_meridiem(Meridiem::Pm);
        assert_eq!((d.hour(), d.minute()), (12, 45));

        d.set_meridiem(Meridiem::Am);
        assert_eq!((d.hour(), d.minute()), (0, 45));
    }

    #[test]
    fn test_to_24_hour() {
        assert_eq!(Meridiem::Am.to_24_hour(12), 0);
        assert_eq!(Meridiem::Am.to_24_hour(7), 7);
        assert_eq!(Meridiem::Pm.to_24_hour(12), 12);
        assert_eq!(Meridiem::Pm.to_24_hour(7), 19);
    }
}
