//! Month grid computation
//!
//! The grid is a pure function of `(year, month, first_day_of_week)`:
//! six weeks of seven cells, with blanks before the 1st and after the
//! last day of the month.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Cells in a month grid (6 weeks x 7 days)
pub const GRID_CELLS: usize = 42;

/// Weekday initials starting on Sunday
const WEEKDAY_INITIALS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// One cell of the month grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarCell {
    /// Placeholder outside the month
    Blank,
    /// Day of the month
    Day(u32),
}

impl CalendarCell {
    /// Day number, if this is not a placeholder
    pub fn day(self) -> Option<u32> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(day) => Some(day),
        }
    }

    /// Check if this cell is a placeholder
    pub fn is_blank(self) -> bool {
        matches!(self, CalendarCell::Blank)
    }
}

// Blank cells are `null` on the wire.
impl Serialize for CalendarCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CalendarCell::Blank => serializer.serialize_none(),
            CalendarCell::Day(day) => serializer.serialize_u32(*day),
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a zero-based month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        1 if is_leap_year(year) => 29,
        1 => 28,
        _ => 30,
    }
}

/// Weekday of the 1st of the month (0 = Sunday)
pub fn first_weekday(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Blank cells before the 1st when weeks start on `first_day_of_week`
pub fn leading_blanks(year: i32, month: u32, first_day_of_week: u8) -> usize {
    let first = first_weekday(year, month) as usize;
    let shift = if first_day_of_week < 7 {
        first_day_of_week as usize
    } else {
        0
    };
    (first + 7 - shift) % 7
}

/// Build the 42-cell grid for a zero-based month
pub fn calendar_grid(year: i32, month: u32, first_day_of_week: u8) -> Vec<CalendarCell> {
    let first = leading_blanks(year, month, first_day_of_week);
    let total = days_in_month(year, month) as usize;

    (0..GRID_CELLS)
        .map(|idx| {
            if idx >= first && idx < first + total {
                CalendarCell::Day((idx - first + 1) as u32)
            } else {
                CalendarCell::Blank
            }
        })
        .collect()
}

/// Weekday header labels rotated to start on `first_day_of_week`
pub fn weekday_labels(first_day_of_week: u8) -> Vec<&'static str> {
    let shift = if first_day_of_week < 7 {
        first_day_of_week as usize
    } else {
        0
    };
    WEEKDAY_INITIALS[shift..]
        .iter()
        .chain(WEEKDAY_INITIALS[..shift].iter())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_june_2023_sunday_start() {
        let grid = calendar_grid(2023, 5, 0);
        assert_eq!(grid.len(), GRID_CELLS);
        // June 1, 2023 is a Thursday
        assert!(grid[..4].iter().all(|c| c.is_blank()));
        assert_eq!(grid[4], CalendarCell::Day(1));
        assert_eq!(grid[33], CalendarCell::Day(30));
        assert!(grid[34..].iter().all(|c| c.is_blank()));
    }

    #[test]
    fn test_monday_start_shifts_blanks() {
        assert_eq!(leading_blanks(2023, 5, 1), 3);
        // October 1, 2023 is a Sunday: it ends a Monday-first week
        assert_eq!(leading_blanks(2023, 9, 1), 6);
        assert_eq!(leading_blanks(2023, 9, 0), 0);
    }

    #[test]
    fn test_leap_february() {
        let grid = calendar_grid(2024, 1, 0);
        let days = grid.iter().filter(|c| !c.is_blank()).count();
        assert_eq!(days, 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(weekday_labels(0), vec!["S", "M", "T", "W", "T", "F", "S"]);
        assert_eq!(weekday_labels(1), vec!["M", "T", "W", "T", "F", "S", "S"]);
        assert_eq!(weekday_labels(6), vec!["S", "S", "M", "T", "W", "T", "F"]);
    }

    #[test]
    fn test_cells_serialize_blank_as_null() {
        let json = serde_json::to_string(&[CalendarCell::Blank, CalendarCell::Day(7)]).unwrap();
        assert_eq!(json, "[null,7]");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every grid has 42 cells and exactly one cell per day of the month
        #[test]
        fn grid_shape(year in 1900i32..2101, month in 0u32..12, first_day in 0u8..7) {
            let grid = calendar_grid(year, month, first_day);
            prop_assert_eq!(grid.len(), GRID_CELLS);

            let days: Vec<u32> = grid.iter().filter_map(|c| c.day()).collect();
            let expected: Vec<u32> = (1..=days_in_month(year, month)).collect();
            prop_assert_eq!(days, expected);
        }

        /// Day 1 lands under its own weekday label
        #[test]
        fn first_day_under_matching_label(
            year in 1900i32..2101,
            month in 0u32..12,
            first_day in 0u8..7,
        ) {
            let grid = calendar_grid(year, month, first_day);
            let column = grid.iter().position(|c| *c == CalendarCell::Day(1)).unwrap();
            prop_assert!(column < 7);

            let weekday = (column + first_day as usize) % 7;
            prop_assert_eq!(weekday as u32, first_weekday(year, month));
        }
    }
}
