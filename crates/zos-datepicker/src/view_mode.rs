//! Widget capability and the editor currently on screen
//!
//! [`Mode`] is configured by the host and says which editors exist at all.
//! [`Editing`] says which one is visible. Changing the mode may force the
//! visible editor to change; [`reconcile_editing`] is that rule.

use serde::{Deserialize, Serialize};

/// Overall widget capability
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Calendar only
    Date,
    /// Calendar and clock wheels
    #[default]
    Datetime,
    /// Clock wheels only
    Time,
}

impl Mode {
    /// Whether the calendar and year list are available
    pub fn has_date(self) -> bool {
        !matches!(self, Mode::Time)
    }

    /// Whether the clock wheels are available
    pub fn has_time(self) -> bool {
        !matches!(self, Mode::Date)
    }
}

/// The sub-editor that is currently visible
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editing {
    /// Month grid
    #[default]
    Date,
    /// Hour and minute wheels
    Time,
    /// Year wheel
    Year,
}

/// Editor to show after the mode changed to `mode` while `editing` was visible.
///
/// A date-only widget cannot show the clock, and a time-only widget can
/// show neither the grid nor the year list. Compatible editors are kept.
pub fn reconcile_editing(mode: Mode, editing: Editing) -> Editing {
    match editing {
        Editing::Time if !mode.has_time() => Editing::Date,
        Editing::Date | Editing::Year if !mode.has_date() => Editing::Time,
        _ => editing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_mode_leaves_time_editor() {
        assert_eq!(reconcile_editing(Mode::Date, Editing::Time), Editing::Date);
        assert_eq!(reconcile_editing(Mode::Date, Editing::Year), Editing::Year);
        assert_eq!(reconcile_editing(Mode::Date, Editing::Date), Editing::Date);
    }

    #[test]
    fn test_time_mode_forces_time_editor() {
        assert_eq!(reconcile_editing(Mode::Time, Editing::Date), Editing::Time);
        assert_eq!(reconcile_editing(Mode::Time, Editing::Year), Editing::Time);
        assert_eq!(reconcile_editing(Mode::Time, Editing::Time), Editing::Time);
    }

    #[test]
    fn test_datetime_keeps_any_editor() {
        for editing in [Editing::Date, Editing::Time, Editing::Year] {
            assert_eq!(reconcile_editing(Mode::Datetime, editing), editing);
        }
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Mode::Datetime).unwrap(), "\"datetime\"");
        assert_eq!(serde_json::to_string(&Editing::Year).unwrap(), "\"year\"");
        let mode: Mode = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(mode, Mode::Time);
        assert!(!mode.has_date());
        assert!(mode.has_time());
    }
}
