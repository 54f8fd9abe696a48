//! Error types for the date picker engine
//!
//! Only construction and host-supplied input can fail. Event handling,
//! snapping and animation never return errors: their failure paths are
//! logged no-ops that recover on the next relevant event.

/// Errors that can occur while configuring or feeding the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// `minuteIncrement` must be positive and divide 60
    InvalidMinuteIncrement(u32),

    /// `firstDayOfWeek` must be in `0..=6`
    InvalidFirstDayOfWeek(u8),

    /// The given components do not form a calendar date-time
    InvalidDate {
        /// Full year
        year: i32,
        /// Zero-based month
        month: u32,
        /// Day of month
        day: u32,
    },

    /// Event name not part of the picker's event surface
    UnknownEvent(String),

    /// JSON serialization or deserialization failed
    SerializationError(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMinuteIncrement(n) => {
                write!(f, "minute increment {} must be positive and divide 60", n)
            }
            Self::InvalidFirstDayOfWeek(d) => {
                write!(f, "first day of week {} out of range (0..=6)", d)
            }
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid date: {}-{:02}-{:02}", year, month + 1, day)
            }
            Self::UnknownEvent(name) => write!(f, "unknown event: {}", name),
            Self::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<serde_json::Error> for PickerError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Result type alias for picker operations
pub type PickerResult<T> = Result<T, PickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PickerError::InvalidMinuteIncrement(7);
        assert_eq!(err.to_string(), "minute increment 7 must be positive and divide 60");

        let err = PickerError::InvalidFirstDayOfWeek(9);
        assert_eq!(err.to_string(), "first day of week 9 out of range (0..=6)");

        let err = PickerError::InvalidDate {
            year: 2023,
            month: 1,
            day: 30,
        };
        assert_eq!(err.to_string(), "invalid date: 2023-02-30");

        let err = PickerError::UnknownEvent("explode".to_string());
        assert_eq!(err.to_string(), "unknown event: explode");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: PickerError = json_err.into();
        assert!(matches!(err, PickerError::SerializationError(_)));
    }
}
