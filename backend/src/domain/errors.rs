//! Error types for the calendar domain.

use shared::ParseCalendarArgError;

/// Errors surfaced to callers of the calendar services
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),
    #[error("At least one time slot must be selected")]
    NoTimesSelected,
    #[error("Invalid calendar configuration: {0}")]
    InvalidConfig(String),
    #[error("Calendar state is unavailable: {0}")]
    StateUnavailable(String),
}

impl From<ParseCalendarArgError> for CalendarError {
    fn from(err: ParseCalendarArgError) -> Self {
        CalendarError::InvalidArgument(err.to_string())
    }
}

/// Reasons an input record is excluded from the grid
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Appointment has neither a date nor an appointment time")]
    MissingDate,
    #[error("Malformed date '{0}'")]
    MalformedDate(String),
    #[error("Malformed date-time '{0}'")]
    MalformedDateTime(String),
    #[error("Date {date} disagrees with appointment time {appointment_time}")]
    DateMismatch {
        date: String,
        appointment_time: String,
    },
    #[error("Malformed time '{0}'")]
    MalformedTime(String),
    #[error("Unsupported availability status '{0}'")]
    UnsupportedStatus(String),
    #[error("Record does not have the expected shape: {0}")]
    Undecodable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_becomes_invalid_argument() {
        let err: CalendarError = "year".parse::<shared::CalendarViewKind>().unwrap_err().into();
        match err {
            CalendarError::InvalidArgument(message) => assert!(message.contains("year")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_record_error_messages() {
        let err = RecordError::DateMismatch {
            date: "2024-03-14".to_string(),
            appointment_time: "2024-03-15T09:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Date 2024-03-14 disagrees with appointment time 2024-03-15T09:00"
        );
    }
}
