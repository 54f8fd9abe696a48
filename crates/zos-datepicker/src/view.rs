//! Derived render model
//!
//! [`PickerView`] is everything a renderer paints, computed from the
//! engine's state on demand. It is never stored, so it cannot go stale.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{
    calendar_grid, weekday_labels, CalendarCell, DateFormatter, Meridiem, SelectedDate, ViewCursor,
};
use crate::config::PickerConfig;
use crate::view_mode::{Editing, Mode};
use crate::wheel::WheelKey;

/// Snapshot of all display values
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerView {
    /// Selected year
    pub year: Option<i32>,
    /// Selected month name
    pub month: Option<String>,
    /// Selected weekday name
    pub weekday: Option<String>,
    /// Selected time of day
    pub time: Option<String>,
    /// Selected hour (0..=23)
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub meridiem: Option<Meridiem>,
    /// Name of the month the grid shows
    pub current_month: String,
    pub current_year: i32,
    pub days_of_week: Vec<&'static str>,
    pub dates: Vec<CalendarCell>,
    pub years: Vec<i32>,
    pub hours: Vec<i32>,
    pub minutes: Vec<i32>,
    pub mode: Mode,
    pub editing: Editing,
}

impl PickerView {
    /// Compute the view for the given state
    pub fn derive(
        date: Option<&SelectedDate>,
        cursor: &ViewCursor,
        config: &PickerConfig,
        mode: Mode,
        editing: Editing,
        formatter: &dyn DateFormatter,
    ) -> Self {
        let naive = date.map(SelectedDate::as_naive);
        let current_month = NaiveDate::from_ymd_opt(cursor.year, cursor.month + 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| formatter.format_month(&d))
            .unwrap_or_default();

        Self {
            year: date.map(SelectedDate::year),
            month: naive.as_ref().map(|d| formatter.format_month(d)),
            weekday: naive.as_ref().map(|d| formatter.format_weekday(d)),
            time: naive.as_ref().map(|d| formatter.format_time(d)),
            hour: date.map(SelectedDate::hour),
            minute: date.map(SelectedDate::minute),
            meridiem: date.map(SelectedDate::meridiem),
            current_month,
            current_year: cursor.year,
            days_of_week: weekday_labels(config.first_day_of_week),
            dates: calendar_grid(cursor.year, cursor.month, config.first_day_of_week),
            years: WheelKey::Year.rows_for(config),
            hours: WheelKey::Hours.rows_for(config),
            minutes: WheelKey::Minutes.rows_for(config),
            mode,
            editing,
        }
    }

    /// Serialize for a JSON renderer
    pub fn to_json(&self) -> crate::error::PickerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
