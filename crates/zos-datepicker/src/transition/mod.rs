//! Time-based tweening
//!
//! Provides easing curves and a keyed animator that turns synthetic or
//! host-clock time into per-frame values.

mod animator;
mod easing;

pub use animator::{AnimationHandle, AnimationStatus, Animator, Frame, Tween, SNAP_DURATION_MS};
pub use easing::Easing;
