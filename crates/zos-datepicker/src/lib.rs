//! Date Picker Engine for Zero OS
//!
//! This crate provides the state engine behind the calendar/clock picker:
//! - Selected date-time and month navigation
//! - Month grid and display values for rendering
//! - Scroll-snap hour, minute and year wheels
//! - Time-driven snap animations with cancellation
//! - Scroll containment for nested scrollable lists
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`calendar`]: Selected date, view cursor, month grid, formatting
//! - [`wheel`]: Wheel keys, wheel surfaces and the snap controller
//! - [`transition`]: Easing curves and the tween animator
//! - [`scroll`]: Gesture decoding and the scroll isolation guard
//! - [`schedule`]: Debounce and deferred-work primitives
//!
//! [`DatePicker`] ties them together: it routes events, runs the date,
//! mode and editing observers, and drives timers and animations from
//! [`DatePicker::tick`].
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use zos_datepicker::{DatePicker, PickerConfig, PickerEvent, WheelSet};
//!
//! let date = NaiveDate::from_ymd_opt(2023, 6, 15)
//!     .unwrap()
//!     .and_hms_opt(14, 5, 0)
//!     .unwrap();
//! let mut picker = DatePicker::new(PickerConfig::default(), Some(date)).unwrap();
//!
//! picker.dispatch(PickerEvent::SetYear { year: 1999 }, 0.0);
//! picker.tick(16.0, &mut WheelSet::new());
//!
//! assert_eq!(picker.view().year, Some(1999));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Time Abstraction**: Every timer and animation takes `now`, so tests use synthetic time
//! 3. **Host Traits**: Wheels and gesture listeners are reached through traits, never a DOM
//! 4. **Minimal Dependencies**: Core types have no browser dependencies

pub mod calendar;
pub mod schedule;
pub mod scroll;
pub mod transition;
pub mod wheel;

mod config;
mod engine;
mod error;
mod types;
mod view;
mod view_mode;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use calendar::{
    CalendarCell, DateFormatter, EnglishFormatter, Meridiem, SelectedDate, ViewCursor,
};
pub use scroll::{GestureDecision, ScrollGesture, ScrollGuard};
pub use transition::{AnimationHandle, Animator, Easing, Tween};
pub use wheel::{
    RowMetrics, SnapController, VirtualWheel, WheelHost, WheelKey, WheelSet, WheelSurface,
};

pub use config::PickerConfig;
pub use engine::{Change, DatePicker, PickerEvent};
pub use error::{PickerError, PickerResult};
pub use types::{AnimationId, Millis};
pub use view::PickerView;
pub use view_mode::{reconcile_editing, Editing, Mode};

/// Duration of wheel snap animations in milliseconds
pub use transition::SNAP_DURATION_MS;

/// Debounce delays in milliseconds
pub use engine::{DRAG_SETTLE_DEBOUNCE_MS, RESYNC_DEBOUNCE_MS};
