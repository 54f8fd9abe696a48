//! Time-driven tween animator
//!
//! Progress is a pure function of `(now - start) / duration`, never of how
//! many frames were rendered, so hosts can drive it from a vsync callback
//! and tests can drive it with synthetic time.
//!
//! The animator does not call back into its owner. Each [`Animator::tick`]
//! returns the frames that happened: one [`Frame::Step`] per running
//! animation and a single [`Frame::Complete`] when progress reaches 1.
//! Cancelling an [`AnimationHandle`] stops all further frames for it.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use tracing::trace;

use super::easing::Easing;
use crate::types::{AnimationId, Millis};

/// Duration of a wheel snap animation in milliseconds
pub const SNAP_DURATION_MS: f32 = 300.0;

/// Interpolation of a scalar between two values over a fixed duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Starting value
    pub from: f32,
    /// Final value
    pub to: f32,
    /// Start time (ms)
    pub start_time: Millis,
    /// Duration (ms)
    pub duration_ms: f32,
    /// Curve applied to progress when sampling
    pub easing: Easing,
}

impl Tween {
    /// Create a tween with the default easing
    pub fn new(from: f32, to: f32, start_time: Millis, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            start_time,
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// Builder-style easing override
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get linear progress (0.0 to 1.0)
    pub fn progress(&self, now: Millis) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start_time) as f32;
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Check if the tween has reached its end
    pub fn is_complete(&self, now: Millis) -> bool {
        self.progress(now) >= 1.0
    }

    /// Eased value at `now`
    pub fn sample(&self, now: Millis) -> f32 {
        let t = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * t
    }
}

/// Lifecycle of one animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Still producing frames
    Running,
    /// Reached progress 1 and emitted its completion
    Completed,
    /// Stopped before completion
    Cancelled,
}

/// Shared handle to a started animation.
///
/// Clones observe the same status. [`cancel`](Self::cancel) is idempotent
/// and a no-op on an animation that already completed or was cancelled.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    id: AnimationId,
    status: Rc<Cell<AnimationStatus>>,
}

impl AnimationHandle {
    fn new(id: AnimationId) -> Self {
        Self {
            id,
            status: Rc::new(Cell::new(AnimationStatus::Running)),
        }
    }

    /// Animation identifier
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// Current status
    pub fn status(&self) -> AnimationStatus {
        self.status.get()
    }

    /// Check if the animation still produces frames
    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    /// Stop the animation. Returns whether this call did the cancelling.
    pub fn cancel(&self) -> bool {
        if self.is_running() {
            self.status.set(AnimationStatus::Cancelled);
            true
        } else {
            false
        }
    }

    fn complete(&self) {
        self.status.set(AnimationStatus::Completed);
    }
}

/// Something that happened to an animation during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Frame<K> {
    /// Per-frame progress
    Step {
        key: K,
        id: AnimationId,
        progress: f32,
        value: f32,
    },
    /// Emitted exactly once, after the final step
    Complete { key: K, id: AnimationId, value: f32 },
}

#[derive(Debug)]
struct Running<K> {
    key: K,
    tween: Tween,
    handle: AnimationHandle,
}

/// Drives any number of keyed tweens
#[derive(Debug)]
pub struct Animator<K> {
    running: Vec<Running<K>>,
    next_id: AnimationId,
}

impl<K> Default for Animator<K> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
            next_id: 1,
        }
    }
}

impl<K: Copy + PartialEq + Debug> Animator<K> {
    /// Create an idle animator
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween for `key`.
    ///
    /// Several animations may share a key; callers that need one animation
    /// per key cancel the previous handle first.
    pub fn animate(&mut self, key: K, tween: Tween) -> AnimationHandle {
        let handle = AnimationHandle::new(self.next_id);
        self.next_id += 1;
        trace!(?key, id = handle.id(), from = tween.from, to = tween.to, "animation started");
        self.running.push(Running {
            key,
            tween,
            handle: handle.clone(),
        });
        handle
    }

    /// Advance every running animation to `now`
    pub fn tick(&mut self, now: Millis) -> Vec<Frame<K>> {
        let mut frames = Vec::with_capacity(self.running.len());
        self.running.retain(|anim| {
            if !anim.handle.is_running() {
                return false;
            }
            let progress = anim.tween.progress(now);
            let id = anim.handle.id();
            if progress >= 1.0 {
                frames.push(Frame::Step {
                    key: anim.key,
                    id,
                    progress,
                    value: anim.tween.to,
                });
                frames.push(Frame::Complete {
                    key: anim.key,
                    id,
                    value: anim.tween.to,
                });
                anim.handle.complete();
                return false;
            }
            frames.push(Frame::Step {
                key: anim.key,
                id,
                progress,
                value: anim.tween.sample(now),
            });
            true
        });
        frames
    }

    /// Cancel everything; returns how many animations were stopped
    pub fn cancel_all(&mut self) -> usize {
        let stopped = self
            .running
            .drain(..)
            .filter(|anim| anim.handle.cancel())
            .count();
        if stopped > 0 {
            trace!(stopped, "animations cancelled");
        }
        stopped
    }

    /// Check if an animation for `key` is still running
    pub fn is_animating(&self, key: K) -> bool {
        self.running
            .iter()
            .any(|anim| anim.key == key && anim.handle.is_running())
    }

    /// Check if nothing is running
    pub fn is_idle(&self) -> bool {
        self.running.iter().all(|anim| !anim.handle.is_running())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_progress_is_time_based() {
        let tween = Tween::new(0.0, 100.0, 1000.0, 300.0);
        assert_eq!(tween.progress(1000.0), 0.0);
        assert!((tween.progress(1150.0) - 0.5).abs() < 0.001);
        assert_eq!(tween.progress(1300.0), 1.0);
        assert_eq!(tween.progress(5000.0), 1.0);
        assert_eq!(tween.progress(0.0), 0.0);
        assert!(!tween.is_complete(1299.0));
        assert!(tween.is_complete(1300.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let tween = Tween::new(10.0, 20.0, 0.0, 0.0);
        assert_eq!(tween.progress(0.0), 1.0);
        assert_eq!(tween.sample(0.0), 20.0);
    }

    #[test]
    fn test_linear_sample() {
        let tween = Tween::new(100.0, 200.0, 0.0, 100.0).with_easing(Easing::Linear);
        assert!((tween.sample(25.0) - 125.0).abs() < 0.001);
    }

    #[test]
    fn test_steps_then_single_completion() {
        let mut animator = Animator::new();
        let handle = animator.animate("hours", Tween::new(0.0, 68.0, 0.0, 300.0));

        let frames = animator.tick(150.0);
        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], Frame::Step { key: "hours", .. }));

        let frames = animator.tick(300.0);
        assert_eq!(frames.len(), 2);
        assert_eq!(
            frames[1],
            Frame::Complete {
                key: "hours",
                id: handle.id(),
                value: 68.0
            }
        );
        assert_eq!(handle.status(), AnimationStatus::Completed);

        assert!(animator.tick(400.0).is_empty());
        assert!(animator.is_idle());
    }

    #[test]
    fn test_cancel_stops_frames() {
        let mut animator = Animator::new();
        let handle = animator.animate(1u8, Tween::new(0.0, 10.0, 0.0, 100.0));
        animator.tick(10.0);

        assert!(handle.cancel());
        assert!(!animator.is_animating(1));
        assert!(animator.tick(200.0).is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut animator = Animator::new();
        let handle = animator.animate(1u8, Tween::new(0.0, 10.0, 0.0, 100.0));
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert_eq!(handle.status(), AnimationStatus::Cancelled);

        let done = animator.animate(2u8, Tween::new(0.0, 10.0, 0.0, 100.0));
        animator.tick(100.0);
        assert!(!done.cancel());
        assert_eq!(done.status(), AnimationStatus::Completed);
    }

    #[test]
    fn test_cancel_all() {
        let mut animator = Animator::new();
        let a = animator.animate('a', Tween::new(0.0, 1.0, 0.0, 100.0));
        let b = animator.animate('b', Tween::new(0.0, 1.0, 0.0, 100.0));
        b.cancel();

        assert_eq!(animator.cancel_all(), 1);
        assert_eq!(a.status(), AnimationStatus::Cancelled);
        assert!(animator.tick(500.0).is_empty());
    }
}
