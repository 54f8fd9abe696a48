//! Display strings for dates
//!
//! Locale-aware formatting belongs to the host; the engine only asks for
//! strings through [`DateFormatter`] and never inspects them.

use chrono::NaiveDateTime;

/// Renders dates for display
pub trait DateFormatter {
    /// Full month name, e.g. "June"
    fn format_month(&self, date: &NaiveDateTime) -> String;

    /// Short weekday name, e.g. "Thu"
    fn format_weekday(&self, date: &NaiveDateTime) -> String;

    /// Hour and minute, e.g. "02:05 PM"
    fn format_time(&self, date: &NaiveDateTime) -> String;
}

/// English formatter backed by chrono's strftime
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishFormatter;

impl DateFormatter for EnglishFormatter {
    fn format_month(&self, date: &NaiveDateTime) -> String {
        date.format("%B").to_string()
    }

    fn format_weekday(&self, date: &NaiveDateTime) -> String {
        date.format("%a").to_string()
    }

    fn format_time(&self, date: &NaiveDateTime) -> String {
        date.format("%I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_english_formatting() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        let fmt = EnglishFormatter;
        assert_eq!(fmt.format_month(&date), "June");
        assert_eq!(fmt.format_weekday(&date), "Thu");
        assert_eq!(fmt.format_time(&date), "02:05 PM");
    }
}
