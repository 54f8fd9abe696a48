//! Wheel snap controller
//!
//! Owns, per wheel, the snap animation and the record of the value the
//! wheel last settled on. Snapping moves a wheel so one row sits in its
//! selection slot. When the move finishes, the row's label is written back
//! into the selected date.
//!
//! State per wheel:
//!
//! ```text
//!   (none) --snap--> Animating --complete--> Settled(v) --snap--> Animating
//!                        |
//!                        +--interrupt--> (none)
//! ```
//!
//! A `Settled(v)` record suppresses snapping the same wheel to `v` again,
//! which would otherwise loop through the date observer that the commit
//! itself triggers.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::key::WheelKey;
use super::surface::{WheelHost, WheelSurface};
use crate::calendar::{Meridiem, SelectedDate};
use crate::transition::{AnimationHandle, Animator, Frame, Tween, SNAP_DURATION_MS};
use crate::types::Millis;
use crate::view_mode::Editing;

/// Rows the year wheel is scrolled past when snapping to an explicit year
const YEAR_CENTER_ROWS: f32 = 3.0;

/// Per-wheel record
#[derive(Clone, Debug)]
pub enum WheelState {
    /// A snap is in flight towards row `index`
    Animating { handle: AnimationHandle, index: usize },
    /// Last snap committed this value
    Settled(i32),
}

impl WheelState {
    pub fn is_animating(&self) -> bool {
        matches!(self, WheelState::Animating { .. })
    }
}

/// Where to snap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapTarget {
    /// Nearest row to the current offset (after a manual drag)
    Nearest,
    /// The row showing `value`; hours are 24-hour and folded by `meridiem`
    Value { value: i32, meridiem: Meridiem },
}

/// Result of a snap request
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapOutcome {
    /// Animation started towards `index`
    Started { index: usize, end_y: f32 },
    /// The wheel is not rendered
    NoSurface,
    /// The wheel has no rows
    Empty,
    /// The wheel already settled on the requested value
    AlreadySettled,
}

/// Why a re-sync was requested
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResyncReason {
    /// The visible editor changed to this one
    ViewChanged(Editing),
    /// The selected date changed
    DateChanged,
}

/// Result of a re-sync
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResyncOutcome {
    /// No date selected; nothing to show
    NoDate,
    /// A wheel is mid-animation
    AnimationInFlight,
    /// Every recorded wheel already shows the date
    AlreadySettled,
    /// Snaps were requested; the count is how many started
    Snapped(usize),
}

/// A value written into the selected date by a finished snap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelCommit {
    pub key: WheelKey,
    pub value: i32,
}

/// Snap animations and settle records for all wheels
#[derive(Debug)]
pub struct SnapController {
    states: BTreeMap<WheelKey, WheelState>,
    animator: Animator<WheelKey>,
    minute_increment: u32,
}

impl SnapController {
    pub fn new(minute_increment: u32) -> Self {
        Self {
            states: BTreeMap::new(),
            animator: Animator::new(),
            minute_increment,
        }
    }

    pub fn state(&self, key: WheelKey) -> Option<&WheelState> {
        self.states.get(&key)
    }

    pub fn is_animating(&self, key: WheelKey) -> bool {
        self.states.get(&key).is_some_and(WheelState::is_animating)
    }

    /// Check if no snap is in flight
    pub fn is_idle(&self) -> bool {
        self.animator.is_idle()
    }

    /// Start snapping `key` towards `target`
    pub fn snap_to(
        &mut self,
        surface: Option<&mut dyn WheelSurface>,
        key: WheelKey,
        target: SnapTarget,
        now: Millis,
    ) -> SnapOutcome {
        let Some(surface) = surface else {
            debug!(%key, "snap skipped: wheel not rendered");
            return SnapOutcome::NoSurface;
        };

        if let (SnapTarget::Value { value, .. }, Some(WheelState::Settled(last))) =
            (target, self.states.get(&key))
        {
            if value == *last {
                trace!(%key, value, "snap skipped: already settled");
                return SnapOutcome::AlreadySettled;
            }
        }

        let start_y = surface.scroll_top();
        let count = surface.row_count();
        let Some(metrics) = surface.row_metrics().filter(|_| count > 0) else {
            debug!(%key, "snap skipped: wheel is empty");
            return SnapOutcome::Empty;
        };
        let extent = metrics.extent();

        let raw = match target {
            SnapTarget::Value { value, meridiem } => {
                key.row_index(value, meridiem, self.minute_increment)
            }
            SnapTarget::Nearest if extent > 0.0 => (start_y / extent).round() as i64,
            SnapTarget::Nearest => 0,
        };
        let index = raw.clamp(0, count as i64 - 1) as usize;

        let Some(offset_top) = surface.row_offset_top(index) else {
            debug!(%key, index, "snap skipped: row not laid out");
            return SnapOutcome::Empty;
        };
        let rows_above = match (key, target) {
            (WheelKey::Year, SnapTarget::Value { .. }) => YEAR_CENTER_ROWS,
            _ => 1.0,
        };
        let end_y = offset_top - extent * rows_above - metrics.centering();

        if let Some(WheelState::Animating { handle, .. }) = self.states.get(&key) {
            handle.cancel();
        }
        let handle = self
            .animator
            .animate(key, Tween::new(start_y, end_y, now, SNAP_DURATION_MS));
        debug!(%key, index, start_y, end_y, "snap started");
        self.states.insert(key, WheelState::Animating { handle, index });

        SnapOutcome::Started { index, end_y }
    }

    /// Advance snap animations, writing offsets and committing finished wheels
    pub fn tick(
        &mut self,
        now: Millis,
        host: &mut dyn WheelHost,
        mut date: Option<&mut SelectedDate>,
    ) -> Vec<WheelCommit> {
        let mut commits = Vec::new();

        for frame in self.animator.tick(now) {
            match frame {
                Frame::Step { key, id, value, .. } => {
                    if !self.owns(key, id) {
                        continue;
                    }
                    if let Some(surface) = host.wheel(key) {
                        surface.set_scroll_top(value);
                    }
                }
                Frame::Complete { key, id, value } => {
                    let Some(WheelState::Animating { index, .. }) = self.states.get(&key) else {
                        continue;
                    };
                    if !self.owns(key, id) {
                        continue;
                    }
                    let index = *index;

                    let label = host.wheel(key).and_then(|surface| {
                        surface.set_scroll_top(value);
                        surface.row_label(index)
                    });
                    let parsed = label.as_deref().and_then(|text| text.trim().parse::<i32>().ok());

                    let committed = match (parsed, date.as_deref_mut()) {
                        (Some(label), Some(date)) => key.commit(date, label),
                        _ => None,
                    };

                    match committed {
                        Some(value) => {
                            debug!(%key, value, "snap committed");
                            self.states.insert(key, WheelState::Settled(value));
                            commits.push(WheelCommit { key, value });
                        }
                        None => {
                            debug!(%key, ?label, "snap finished without commit");
                            self.states.remove(&key);
                        }
                    }
                }
            }
        }

        commits
    }

    /// Cancel every in-flight snap and forget all records
    pub fn interrupt(&mut self) -> usize {
        let cancelled = self.animator.cancel_all();
        self.states.clear();
        if cancelled > 0 {
            debug!(cancelled, "wheel snaps interrupted");
        }
        cancelled
    }

    /// Bring the visible wheels in line with `date`.
    ///
    /// `editing` is the view at execution time. When the trigger was a
    /// view change, records of the wheels that just went out of view are
    /// discarded first so they cannot block later snaps.
    pub fn resync(
        &mut self,
        editing: Editing,
        reason: ResyncReason,
        date: Option<&SelectedDate>,
        host: &mut dyn WheelHost,
        now: Millis,
    ) -> ResyncOutcome {
        if let ResyncReason::ViewChanged(view) = reason {
            let stale: &[WheelKey] = match view {
                Editing::Year => &[WheelKey::Hours, WheelKey::Minutes],
                Editing::Time => &[WheelKey::Year],
                Editing::Date => &[],
            };
            for key in stale {
                self.cancel(*key);
            }
        }

        let Some(date) = date else {
            return ResyncOutcome::NoDate;
        };

        if self.states.values().any(WheelState::is_animating) {
            trace!(?reason, "resync skipped: snap in flight");
            return ResyncOutcome::AnimationInFlight;
        }
        let all_settled = !self.states.is_empty()
            && self.states.iter().all(|(key, state)| {
                matches!(state, WheelState::Settled(v) if *v == key.current_value(date))
            });
        if all_settled {
            trace!(?reason, "resync skipped: wheels already settled");
            return ResyncOutcome::AlreadySettled;
        }

        let keys: &[WheelKey] = match editing {
            Editing::Time => &[WheelKey::Hours, WheelKey::Minutes],
            Editing::Year => &[WheelKey::Year],
            Editing::Date => &[],
        };
        let meridiem = date.meridiem();
        let started = keys
            .iter()
            .filter(|key| {
                let target = SnapTarget::Value {
                    value: key.current_value(date),
                    meridiem,
                };
                let outcome = self.snap_to(host.wheel(**key), **key, target, now);
                matches!(outcome, SnapOutcome::Started { .. })
            })
            .count();

        ResyncOutcome::Snapped(started)
    }

    /// Cancel and forget one wheel's record; returns whether a snap was stopped
    pub fn cancel(&mut self, key: WheelKey) -> bool {
        match self.states.remove(&key) {
            Some(WheelState::Animating { handle, .. }) => handle.cancel(),
            _ => false,
        }
    }

    fn owns(&self, key: WheelKey, id: u64) -> bool {
        matches!(
            self.states.get(&key),
            Some(WheelState::Animating { handle, .. }) if handle.id() == id
        )
    }
}
