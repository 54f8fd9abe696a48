//! The month the calendar grid is showing

use super::date::{representable_years, SelectedDate};

/// Viewed year/month, independent of the selected date.
///
/// Navigating moves the cursor only; the selected date follows when a day
/// is picked or the year is stepped. Steps stop at the edges of
/// [`representable_years`], so the cursor never shows a month the selected
/// date could not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewCursor {
    /// Full year
    pub year: i32,
    /// Zero-based month
    pub month: u32,
}

impl ViewCursor {
    /// Cursor at a year and zero-based month (wrapped into 0..=11)
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month % 12,
        }
    }

    /// Cursor showing the month of `date`
    pub fn from_date(date: &SelectedDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Next month, rolling December into January of the next year
    pub fn increment_month(&mut self) {
        if self.month == 11 {
            if self.year < *representable_years().end() {
                self.month = 0;
                self.year += 1;
            }
        } else {
            self.month += 1;
        }
    }

    /// Previous month, rolling January into December of the previous year
    pub fn decrement_month(&mut self) {
        if self.month == 0 {
            if self.year > *representable_years().start() {
                self.month = 11;
                self.year -= 1;
            }
        } else {
            self.month -= 1;
        }
    }

    /// Same month next year
    pub fn increment_year(&mut self) {
        if self.year < *representable_years().end() {
            self.year += 1;
        }
    }

    /// Same month previous year
    pub fn decrement_year(&mut self) {
        if self.year > *representable_years().start() {
            self.year -= 1;
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Stepping back then forward returns to the same month
        #[test]
        fn month_steps_are_inverse(year in -5000i32..5000, month in 0u32..12) {
            let start = ViewCursor::new(year, month);

            let mut cursor = start;
            cursor.decrement_month();
            cursor.increment_month();
            prop_assert_eq!(cursor, start);

            cursor.increment_month();
            cursor.decrement_month();
            prop_assert_eq!(cursor, start);
        }

        /// The month always stays in range
        #[test]
        fn month_stays_in_range(year in -5000i32..5000, month in 0u32..12, steps in 0usize..40) {
            let mut cursor = ViewCursor::new(year, month);
            for _ in 0..steps {
                cursor.increment_month();
                prop_assert!(cursor.month < 12);
            }
            for _ in 0..steps {
                cursor.decrement_month();
                prop_assert!(cursor.month < 12);
            }
            prop_assert_eq!(cursor, ViewCursor::new(year, month));
        }
    }
}
