//! Core type definitions for the picker engine
//!
//! This module centralizes type aliases used throughout the crate
//! for consistency and discoverability.

/// Host clock reading in milliseconds
///
/// Every time-dependent entry point takes the current time explicitly so
/// that animations and debounce timers can be driven by synthetic time.
pub type Millis = f64;

/// Unique animation identifier
///
/// Animations are identified by a monotonically increasing 64-bit integer,
/// unique within one `Animator`.
pub type AnimationId = u64;
