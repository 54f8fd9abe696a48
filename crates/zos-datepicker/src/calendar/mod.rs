//! Date and calendar state
//!
//! Provides the selected date-time, the month navigation cursor and the
//! derived month grid.

mod cursor;
mod date;
mod format;
mod grid;

pub use cursor::ViewCursor;
pub use date::{representable_years, twelve_hour, Meridiem, SelectedDate};
pub use format::{DateFormatter, EnglishFormatter};
pub use grid::{
    calendar_grid, days_in_month, first_weekday, leading_blanks, weekday_labels, CalendarCell,
    GRID_CELLS,
};
