//! Date picker engine
//!
//! [`DatePicker`] owns all picker state and is the only thing that mutates
//! it. Hosts feed it three kinds of input:
//!
//! - [`DatePicker::dispatch`] for user events (buttons, day cells, drags)
//! - [`DatePicker::set_date`] when the bound date is replaced from outside
//! - [`DatePicker::tick`] every animation frame, with the host clock
//!
//! ```text
//!   dispatch / set_date            tick(now)
//!          |                          |
//!          v                          v
//!   +-------------+   debounce   +----------+   frames   +----------------+
//!   |  observers  | -----------> |  resync  | ---------> | SnapController |
//!   | date (now)  |              | drag     |            |  (commit date) |
//!   | mode/edit   |  deferred    +----------+            +----------------+
//!   +-------------+                                              |
//!          ^-------------------- date changed -------------------+
//! ```
//!
//! The date observer runs immediately; mode and editing observers are
//! deferred until the current dispatch settles.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::calendar::{
    representable_years, DateFormatter, EnglishFormatter, Meridiem, SelectedDate, ViewCursor,
};
use crate::config::PickerConfig;
use crate::error::{PickerError, PickerResult};
use crate::schedule::{Debounce, DeferredQueue};
use crate::scroll::{GestureDecision, GestureHost, ScrollGesture, ScrollGuard};
use crate::types::Millis;
use crate::view::PickerView;
use crate::view_mode::{reconcile_editing, Editing, Mode};
use crate::wheel::{ResyncReason, SnapController, SnapTarget, WheelHost, WheelKey};

/// Delay before wheels are re-synced after a view or date change
pub const RESYNC_DEBOUNCE_MS: Millis = 10.0;

/// Quiet period after the last manual drag before the wheel settles
pub const DRAG_SETTLE_DEBOUNCE_MS: Millis = 250.0;

// =============================================================================
// Events and change notifications
// =============================================================================

/// User-level events, tagged by their wire name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PickerEvent {
    /// Show the previous month
    DecrementMonth,
    /// Show the next month
    IncrementMonth,
    /// Step the viewed year back and commit it
    DecrementYear,
    /// Step the viewed year forward and commit it
    IncrementYear,
    /// Commit the viewed month, optionally picking a day
    SetDate {
        #[serde(default)]
        day: Option<u32>,
    },
    /// Pick a year from the year list
    SetYear { year: i32 },
    /// Switch between morning and afternoon
    SetMeridiem { meridiem: Meridiem },
    /// The user is dragging a wheel
    #[serde(rename = "clockwheel")]
    ClockWheel { wheel: WheelKey },
    /// Change the widget capability
    SetMode { mode: Mode },
    /// Show another editor
    SetEditing { editing: Editing },
}

impl PickerEvent {
    /// Every accepted wire name
    pub const NAMES: [&'static str; 10] = [
        "decrementMonth",
        "incrementMonth",
        "decrementYear",
        "incrementYear",
        "setDate",
        "setYear",
        "setMeridiem",
        "clockwheel",
        "setMode",
        "setEditing",
    ];

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            Self::DecrementMonth => "decrementMonth",
            Self::IncrementMonth => "incrementMonth",
            Self::DecrementYear => "decrementYear",
            Self::IncrementYear => "incrementYear",
            Self::SetDate { .. } => "setDate",
            Self::SetYear { .. } => "setYear",
            Self::SetMeridiem { .. } => "setMeridiem",
            Self::ClockWheel { .. } => "clockwheel",
            Self::SetMode { .. } => "setMode",
            Self::SetEditing { .. } => "setEditing",
        }
    }

    /// Parse an event from its JSON form, e.g. `{"event":"setYear","year":1999}`
    pub fn from_json(json: &str) -> PickerResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(name) = value.get("event").and_then(|v| v.as_str()) {
            if !Self::NAMES.contains(&name) {
                return Err(PickerError::UnknownEvent(name.to_string()));
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// State paths a renderer may observe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Change {
    Date,
    Cursor,
    Mode,
    Editing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    ModeChanged,
    EditingChanged(Editing),
}

// =============================================================================
// DatePicker
// =============================================================================

/// The picker engine
pub struct DatePicker<F: DateFormatter = EnglishFormatter> {
    config: PickerConfig,
    date: Option<SelectedDate>,
    cursor: ViewCursor,
    mode: Mode,
    editing: Editing,
    formatter: F,
    wheels: SnapController,
    resync: Debounce<ResyncReason>,
    drag_settle: Debounce<WheelKey>,
    deferred: DeferredQueue<Deferred>,
    changes: Vec<Change>,
}

impl DatePicker<EnglishFormatter> {
    /// Create a picker with English display strings.
    ///
    /// A missing date defaults to the current local time.
    pub fn new(config: PickerConfig, date: Option<NaiveDateTime>) -> PickerResult<Self> {
        Self::with_formatter(config, date, EnglishFormatter)
    }
}

impl<F: DateFormatter> DatePicker<F> {
    /// Create a picker with a custom formatter
    pub fn with_formatter(
        config: PickerConfig,
        date: Option<NaiveDateTime>,
        formatter: F,
    ) -> PickerResult<Self> {
        config.validate()?;

        let date = date.map(SelectedDate::new).unwrap_or_else(SelectedDate::now);
        let mut picker = Self {
            cursor: ViewCursor::from_date(&date),
            date: Some(date),
            mode: config.mode,
            editing: Editing::default(),
            formatter,
            wheels: SnapController::new(config.minute_increment),
            resync: Debounce::new(RESYNC_DEBOUNCE_MS),
            drag_settle: Debounce::new(DRAG_SETTLE_DEBOUNCE_MS),
            deferred: DeferredQueue::new(),
            changes: Vec::new(),
            config,
        };

        // The mode observer also runs once at construction
        let editing = reconcile_editing(picker.mode, picker.editing);
        if editing != picker.editing {
            picker.editing = editing;
            picker.resync.call_immediately(ResyncReason::ViewChanged(editing));
        }

        debug!(mode = ?picker.mode, editing = ?picker.editing, "date picker created");
        Ok(picker)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Selected date, `None` if the host cleared it
    pub fn date(&self) -> Option<&SelectedDate> {
        self.date.as_ref()
    }

    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn editing(&self) -> Editing {
        self.editing
    }

    pub fn wheels(&self) -> &SnapController {
        &self.wheels
    }

    /// Current render model
    pub fn view(&self) -> PickerView {
        PickerView::derive(
            self.date.as_ref(),
            &self.cursor,
            &self.config,
            self.mode,
            self.editing,
            &self.formatter,
        )
    }

    /// Drain change notifications since the last call
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    /// Earliest pending timer, if any
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.resync.deadline(), self.drag_settle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Check if ticking would do nothing
    pub fn is_idle(&self) -> bool {
        self.wheels.is_idle()
            && !self.resync.is_pending()
            && !self.drag_settle.is_pending()
            && self.deferred.is_empty()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle one user event
    pub fn dispatch(&mut self, event: PickerEvent, now: Millis) {
        debug!(event = event.name(), "dispatch");

        match event {
            PickerEvent::DecrementMonth => {
                self.cursor.decrement_month();
                self.cursor_changed();
            }
            PickerEvent::IncrementMonth => {
                self.cursor.increment_month();
                self.cursor_changed();
            }
            PickerEvent::DecrementYear => {
                self.cursor.decrement_year();
                self.cursor_changed();
                self.commit_cursor(None, now);
            }
            PickerEvent::IncrementYear => {
                self.cursor.increment_year();
                self.cursor_changed();
                self.commit_cursor(None, now);
            }
            PickerEvent::SetDate { day } => self.commit_cursor(day, now),
            PickerEvent::SetYear { year } if !representable_years().contains(&year) => {
                warn!(year, "ignoring unrepresentable year");
            }
            PickerEvent::SetYear { year } => {
                // A picked year overrides a year snap still in flight
                self.wheels.cancel(WheelKey::Year);
                self.update_date(now, |date| date.set_full_year(year));
                if self.cursor.year != year {
                    self.cursor.year = year;
                    self.cursor_changed();
                }
                self.set_editing(Editing::Date);
            }
            PickerEvent::SetMeridiem { meridiem } => {
                self.update_date(now, |date| date.set_meridiem(meridiem));
            }
            PickerEvent::ClockWheel { wheel } => {
                self.wheels.interrupt();
                self.drag_settle.call(now, wheel);
            }
            PickerEvent::SetMode { mode } => self.set_mode(mode),
            PickerEvent::SetEditing { editing } => {
                self.set_editing(reconcile_editing(self.mode, editing));
            }
        }

        self.flush_deferred(now);
    }

    /// Replace the selected date from the host; `None` clears it
    pub fn set_date(&mut self, date: Option<NaiveDateTime>, now: Millis) {
        let date = date.map(SelectedDate::new);
        if date != self.date {
            self.date = date;
            self.date_changed(now);
        }
        self.flush_deferred(now);
    }

    /// Route a scroll gesture over a wheel through its guard.
    ///
    /// Gestures the guard lets through scroll the wheel natively and count
    /// as a manual drag.
    pub fn wheel_gesture<H: GestureHost>(
        &mut self,
        guard: &ScrollGuard<H>,
        wheel: WheelKey,
        scroll_top: f32,
        gesture: ScrollGesture,
        now: Millis,
    ) -> GestureDecision {
        let decision = guard.decide(scroll_top, &gesture);
        self.route_gesture(wheel, decision, now);
        decision
    }

    /// Apply a containment decision a host listener already made for `wheel`.
    ///
    /// A passed-through gesture scrolls the wheel natively, so it interrupts
    /// any snap and re-arms the drag settle. Contained gestures change nothing.
    pub fn route_gesture(&mut self, wheel: WheelKey, decision: GestureDecision, now: Millis) {
        match decision {
            GestureDecision::PassThrough => self.dispatch(PickerEvent::ClockWheel { wheel }, now),
            GestureDecision::Contain => trace!(%wheel, "contained gesture left wheel alone"),
        }
    }

    /// Advance timers and animations to `now`
    pub fn tick(&mut self, now: Millis, host: &mut dyn WheelHost) {
        if let Some(key) = self.drag_settle.poll(now) {
            let outcome = self
                .wheels
                .snap_to(host.wheel(key), key, SnapTarget::Nearest, now);
            debug!(%key, ?outcome, "drag settled");
        }

        if let Some(reason) = self.resync.poll(now) {
            let outcome = self
                .wheels
                .resync(self.editing, reason, self.date.as_ref(), host, now);
            trace!(?reason, ?outcome, "wheels resynced");
        }

        let before = self.date;
        let commits = self.wheels.tick(now, host, self.date.as_mut());
        if !commits.is_empty() && self.date != before {
            self.date_changed(now);
        }

        self.flush_deferred(now);
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn commit_cursor(&mut self, day: Option<u32>, now: Millis) {
        let ViewCursor { year, month } = self.cursor;
        self.update_date(now, |date| {
            date.set_year_month(year, month);
            if let Some(day) = day {
                date.set_day(day);
            }
        });
    }

    fn update_date(&mut self, now: Millis, apply: impl FnOnce(&mut SelectedDate)) {
        let Some(date) = self.date.as_mut() else {
            debug!("no date selected; ignoring");
            return;
        };
        let before = *date;
        apply(date);
        if *date != before {
            self.date_changed(now);
        }
    }

    fn date_changed(&mut self, now: Millis) {
        self.changes.push(Change::Date);
        self.schedule_resync(now, ResyncReason::DateChanged);
    }

    fn cursor_changed(&mut self) {
        self.changes.push(Change::Cursor);
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.mode = mode;
            self.changes.push(Change::Mode);
            self.deferred.push(Deferred::ModeChanged);
        }
    }

    fn set_editing(&mut self, editing: Editing) {
        if editing != self.editing {
            self.editing = editing;
            self.changes.push(Change::Editing);
            self.deferred.push(Deferred::EditingChanged(editing));
        }
    }

    // A pending view change outranks a later date change: it carries the
    // stale-record cleanup.
    fn schedule_resync(&mut self, now: Millis, reason: ResyncReason) {
        let reason = match (self.resync.cancel(), reason) {
            (Some(view @ ResyncReason::ViewChanged(_)), ResyncReason::DateChanged) => view,
            (_, reason) => reason,
        };
        self.resync.call(now, reason);
    }

    fn flush_deferred(&mut self, now: Millis) {
        while let Some(item) = self.deferred.pop() {
            match item {
                Deferred::ModeChanged => {
                    let editing = reconcile_editing(self.mode, self.editing);
                    self.set_editing(editing);
                }
                Deferred::EditingChanged(editing) => {
                    self.schedule_resync(now, ResyncReason::ViewChanged(editing));
                }
            }
        }
    }
}

impl<F: DateFormatter> std::fmt::Debug for DatePicker<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("date", &self.date)
            .field("cursor", &self.cursor)
            .field("mode", &self.mode)
            .field("editing", &self.editing)
            .field("wheels", &self.wheels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelSet;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn picker() -> DatePicker {
        DatePicker::new(PickerConfig::default(), Some(at(2023, 6, 15, 14, 5))).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = PickerConfig::default().with_minute_increment(7);
        let err = DatePicker::new(config, None).unwrap_err();
        assert_eq!(err, PickerError::InvalidMinuteIncrement(7));
    }

    #[test]
    fn test_missing_date_defaults_to_now() {
        let p = DatePicker::new(PickerConfig::default(), None).unwrap();
        assert!(p.date().is_some());
        assert_eq!(p.cursor(), ViewCursor::from_date(p.date().unwrap()));
    }

    #[test]
    fn test_month_navigation_leaves_date() {
        let mut p = picker();
        for _ in 0..7 {
            p.dispatch(PickerEvent::IncrementMonth, 0.0);
        }
        assert_eq!(p.cursor(), ViewCursor::new(2024, 0));
        assert_eq!(p.date().unwrap().month(), 5);
        assert!(p.take_changes().iter().all(|c| *c == Change::Cursor));
    }

    #[test]
    fn test_year_step_commits_date() {
        let mut p = picker();
        p.dispatch(PickerEvent::IncrementMonth, 0.0);
        p.dispatch(PickerEvent::DecrementYear, 0.0);

        let d = p.date().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2022, 6, 15));
        assert!(p.take_changes().contains(&Change::Date));
    }

    #[test]
    fn test_set_date_picks_day_in_viewed_month() {
        let mut p = picker();
        p.dispatch(PickerEvent::DecrementMonth, 0.0);
        p.dispatch(PickerEvent::SetDate { day: Some(31) }, 0.0);

        let d = p.date().unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2023, 4, 31));
        assert_eq!((d.hour(), d.minute()), (14, 5));
    }

    #[test]
    fn test_set_meridiem() {
        let mut p = picker();
        p.dispatch(PickerEvent::SetMeridiem { meridiem: Meridiem::Am }, 0.0);
        assert_eq!(p.date().unwrap().hour(), 2);
        p.dispatch(PickerEvent::SetMeridiem { meridiem: Meridiem::Am }, 0.0);
        assert_eq!(p.date().unwrap().hour(), 2);
    }

    #[test]
    fn test_mode_change_is_deferred_and_reconciles() {
        let mut p = picker();
        p.dispatch(PickerEvent::SetEditing { editing: Editing::Time }, 0.0);
        p.dispatch(PickerEvent::SetMode { mode: Mode::Date }, 5.0);

        assert_eq!(p.editing(), Editing::Date);
        let changes = p.take_changes();
        assert_eq!(changes, vec![Change::Editing, Change::Mode, Change::Editing]);
    }

    #[test]
    fn test_time_mode_opens_on_clock() {
        let config = PickerConfig::default().with_mode(Mode::Time);
        let mut p = DatePicker::new(config, Some(at(2023, 6, 15, 14, 5))).unwrap();
        assert_eq!(p.editing(), Editing::Time);
        assert!(!p.is_idle());

        let mut wheels = WheelSet::new();
        p.tick(0.0, &mut wheels);
        assert!(p.is_idle());
    }

    #[test]
    fn test_editing_constrained_by_mode() {
        let config = PickerConfig::default().with_mode(Mode::Date);
        let mut p = DatePicker::new(config, Some(at(2023, 6, 15, 14, 5))).unwrap();
        p.dispatch(PickerEvent::SetEditing { editing: Editing::Time }, 0.0);
        assert_eq!(p.editing(), Editing::Date);
    }

    #[test]
    fn test_cleared_date_ignores_commits() {
        let mut p = picker();
        p.set_date(None, 0.0);
        assert!(p.date().is_none());
        assert_eq!(p.view().year, None);

        p.dispatch(PickerEvent::SetDate { day: Some(3) }, 1.0);
        p.dispatch(PickerEvent::SetMeridiem { meridiem: Meridiem::Am }, 1.0);
        assert!(p.date().is_none());

        p.dispatch(PickerEvent::SetYear { year: 2001 }, 1.0);
        assert_eq!(p.cursor().year, 2001);
    }

    #[test]
    fn test_unrepresentable_year_keeps_cursor_and_date_together() {
        let mut p = picker();
        p.dispatch(PickerEvent::SetEditing { editing: Editing::Year }, 0.0);
        p.take_changes();

        for year in [300_000, i32::MAX, i32::MIN] {
            p.dispatch(PickerEvent::SetYear { year }, 1.0);
        }
        assert_eq!(p.date().unwrap().year(), 2023);
        assert_eq!(p.cursor(), ViewCursor::new(2023, 5));
        assert_eq!(p.editing(), Editing::Year);
        assert!(p.take_changes().is_empty());

        p.dispatch(PickerEvent::IncrementYear, 2.0);
        assert_eq!(p.date().unwrap().year(), 2024);
        let view = p.view();
        assert_eq!((view.current_month.as_str(), view.current_year), ("June", 2024));
    }

    #[test]
    fn test_year_steps_stop_at_last_representable_year() {
        let last = *representable_years().end();
        let mut p = picker();
        p.dispatch(PickerEvent::SetYear { year: last }, 0.0);
        p.dispatch(PickerEvent::IncrementYear, 1.0);
        p.dispatch(PickerEvent::IncrementYear, 2.0);

        assert_eq!(p.cursor().year, last);
        assert_eq!(p.date().unwrap().year(), last);
    }

    #[test]
    fn test_view_change_survives_following_date_change() {
        let mut p = picker();
        p.dispatch(PickerEvent::SetEditing { editing: Editing::Year }, 0.0);
        p.dispatch(PickerEvent::SetMeridiem { meridiem: Meridiem::Am }, 2.0);
        assert_eq!(p.next_deadline(), Some(12.0));
        assert_eq!(p.resync.deadline(), Some(12.0));
        assert!(matches!(
            p.resync.cancel(),
            Some(ResyncReason::ViewChanged(Editing::Year))
        ));
    }

    #[test]
    fn test_event_json() {
        let event = PickerEvent::from_json(r#"{"event":"setYear","year":1999}"#).unwrap();
        assert_eq!(event, PickerEvent::SetYear { year: 1999 });

        let event = PickerEvent::from_json(r#"{"event":"setDate"}"#).unwrap();
        assert_eq!(event, PickerEvent::SetDate { day: None });

        let event =
            PickerEvent::from_json(r#"{"event":"clockwheel","wheel":"setMinutes"}"#).unwrap();
        assert_eq!(event, PickerEvent::ClockWheel { wheel: WheelKey::Minutes });
        assert_eq!(event.name(), "clockwheel");

        let event = PickerEvent::from_json(r#"{"event":"setMeridiem","meridiem":"pm"}"#).unwrap();
        assert_eq!(event.name(), "setMeridiem");

        let err = PickerEvent::from_json(r#"{"event":"explode"}"#).unwrap_err();
        assert_eq!(err, PickerError::UnknownEvent("explode".to_string()));

        let err = PickerEvent::from_json(r#"{"event":"setYear"}"#).unwrap_err();
        assert!(matches!(err, PickerError::SerializationError(_)));
    }

    #[test]
    fn test_event_names_cover_all_variants() {
        let events = [
            PickerEvent::DecrementMonth,
            PickerEvent::IncrementMonth,
            PickerEvent::DecrementYear,
            PickerEvent::IncrementYear,
            PickerEvent::SetDate { day: None },
            PickerEvent::SetYear { year: 0 },
            PickerEvent::SetMeridiem { meridiem: Meridiem::Am },
            PickerEvent::ClockWheel { wheel: WheelKey::Year },
            PickerEvent::SetMode { mode: Mode::Date },
            PickerEvent::SetEditing { editing: Editing::Date },
        ];
        let names: Vec<_> = events.iter().map(PickerEvent::name).collect();
        assert_eq!(names, PickerEvent::NAMES);
    }
}
