//! Scroll containment for nested scrollable regions

mod gesture;
mod guard;

pub use gesture::{
    GestureDecision, GestureKind, ListenerTarget, ScrollGesture, TouchTracker,
    CONTAINMENT_LISTENERS,
};
pub use guard::{Containment, GestureHost, ScrollGuard, ScrollMetrics};
