//! Scroll-snap wheels for hours, minutes and years
//!
//! - [`WheelKey`] names a wheel and maps its rows to date values
//! - [`WheelSurface`]/[`WheelHost`] abstract the rendered row lists
//! - [`SnapController`] animates wheels onto rows and commits the result

mod controller;
mod key;
mod surface;

pub use controller::{
    ResyncOutcome, ResyncReason, SnapController, SnapOutcome, SnapTarget, WheelCommit, WheelState,
};
pub use key::{WheelKey, FIRST_YEAR, LAST_YEAR};
pub use surface::{RowMetrics, VirtualWheel, WheelHost, WheelSet, WheelSurface};
