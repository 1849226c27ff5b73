//! Domain model for an appointment.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use shared::{AppointmentRecord, RecordId};

use crate::domain::dates::{parse_calendar_date, parse_date_time};
use crate::domain::errors::RecordError;

/// Appointment status code; only "scheduled" carries meaning for the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Other(i32),
}

impl AppointmentStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => AppointmentStatus::Scheduled,
            other => AppointmentStatus::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            AppointmentStatus::Scheduled => 0,
            AppointmentStatus::Other(code) => *code,
        }
    }

    pub fn label(&self) -> String {
        match self {
            AppointmentStatus::Scheduled => "Scheduled".to_string(),
            AppointmentStatus::Other(code) => code.to_string(),
        }
    }
}

/// When an appointment takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentSchedule {
    /// Only the day is known; the time is still to be decided
    DateOnly(NaiveDate),
    Timed(NaiveDateTime),
}

impl AppointmentSchedule {
    pub fn date(&self) -> NaiveDate {
        match self {
            AppointmentSchedule::DateOnly(date) => *date,
            AppointmentSchedule::Timed(date_time) => date_time.date(),
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            AppointmentSchedule::DateOnly(_) => None,
            AppointmentSchedule::Timed(date_time) => Some(date_time.time()),
        }
    }

    /// Start time truncated to the minute, which is what grid rows are keyed on
    pub fn hour_minute(&self) -> Option<NaiveTime> {
        self.time()
            .and_then(|time| NaiveTime::from_hms_opt(time.hour(), time.minute(), 0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: RecordId,
    pub patient_name: Option<String>,
    pub schedule: AppointmentSchedule,
    pub status: AppointmentStatus,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

impl Appointment {
    /// A scheduled appointment on a day without a fixed time
    pub fn on_date(id: impl Into<RecordId>, date: NaiveDate, duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            patient_name: None,
            schedule: AppointmentSchedule::DateOnly(date),
            status: AppointmentStatus::Scheduled,
            duration_minutes,
            notes: None,
        }
    }

    /// A scheduled appointment at a fixed date and time
    pub fn at(id: impl Into<RecordId>, start: NaiveDateTime, duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            patient_name: None,
            schedule: AppointmentSchedule::Timed(start),
            status: AppointmentStatus::Scheduled,
            duration_minutes,
            notes: None,
        }
    }

    pub fn with_patient(mut self, name: impl Into<String>) -> Self {
        self.patient_name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate a wire record.
    ///
    /// At least one of `date` and `appointmentTime` must be present. When both
    /// are, they must name the same day. Blank strings count as absent.
    pub fn from_record(record: &AppointmentRecord, default_duration_minutes: u32) -> Result<Self, RecordError> {
        let date = non_blank(record.date.as_deref())
            .map(parse_calendar_date)
            .transpose()?;
        let start = non_blank(record.appointment_time.as_deref())
            .map(parse_date_time)
            .transpose()?;

        let schedule = match (date, start) {
            (None, None) => return Err(RecordError::MissingDate),
            (Some(date), None) => AppointmentSchedule::DateOnly(date),
            (None, Some(start)) => AppointmentSchedule::Timed(start),
            (Some(date), Some(start)) => {
                if date != start.date() {
                    return Err(RecordError::DateMismatch {
                        date: record.date.clone().unwrap_or_default(),
                        appointment_time: record.appointment_time.clone().unwrap_or_default(),
                    });
                }
                AppointmentSchedule::Timed(start)
            }
        };

        Ok(Self {
            id: record.id.clone(),
            patient_name: non_blank(record.patient_name.as_deref()).map(str::to_string),
            schedule,
            status: AppointmentStatus::from_code(record.status.unwrap_or_default()),
            duration_minutes: record
                .duration_minutes
                .filter(|minutes| *minutes > 0)
                .unwrap_or(default_duration_minutes),
            notes: non_blank(record.notes.as_deref()).map(str::to_string),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.schedule.date()
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.schedule.time()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: Option<&str>, appointment_time: Option<&str>) -> AppointmentRecord {
        AppointmentRecord {
            id: RecordId::Number(1),
            patient_name: Some("Jane Doe".to_string()),
            date: date.map(str::to_string),
            appointment_time: appointment_time.map(str::to_string),
            status: None,
            duration_minutes: None,
            notes: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_only_record() {
        let appointment = Appointment::from_record(&record(Some("2024-03-15"), None), 30).unwrap();
        assert_eq!(appointment.schedule, AppointmentSchedule::DateOnly(date(2024, 3, 15)));
        assert_eq!(appointment.time(), None);
        assert_eq!(appointment.duration_minutes, 30);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_timed_record() {
        let appointment = Appointment::from_record(&record(None, Some("2024-03-15T09:30:00")), 30).unwrap();
        assert_eq!(appointment.date(), date(2024, 3, 15));
        assert_eq!(appointment.time(), NaiveTime::from_hms_opt(9, 30, 0));
    }

    #[test]
    fn test_matching_date_and_time() {
        let appointment =
            Appointment::from_record(&record(Some("2024-03-15"), Some("2024-03-15T14:00")), 30).unwrap();
        assert!(matches!(appointment.schedule, AppointmentSchedule::Timed(_)));
    }

    #[test]
    fn test_disagreeing_date_and_time_rejected() {
        let err = Appointment::from_record(&record(Some("2024-03-14"), Some("2024-03-15T14:00")), 30).unwrap_err();
        assert!(matches!(err, RecordError::DateMismatch { .. }));
    }

    #[test]
    fn test_missing_and_malformed_dates_rejected() {
        assert_eq!(
            Appointment::from_record(&record(None, None), 30).unwrap_err(),
            RecordError::MissingDate
        );
        assert_eq!(
            Appointment::from_record(&record(Some("  "), None), 30).unwrap_err(),
            RecordError::MissingDate
        );
        assert_eq!(
            Appointment::from_record(&record(Some("not-a-date"), None), 30).unwrap_err(),
            RecordError::MalformedDate("not-a-date".to_string())
        );
        assert!(matches!(
            Appointment::from_record(&record(None, Some("2024-03-15T99:00")), 30).unwrap_err(),
            RecordError::MalformedDateTime(_)
        ));
    }

    #[test]
    fn test_duration_and_status_passthrough() {
        let mut raw = record(Some("2024-03-15"), None);
        raw.duration_minutes = Some(60);
        raw.status = Some(2);
        raw.notes = Some("Bring lab results".to_string());

        let appointment = Appointment::from_record(&raw, 30).unwrap();
        assert_eq!(appointment.duration_minutes, 60);
        assert_eq!(appointment.status, AppointmentStatus::Other(2));
        assert_eq!(appointment.status.label(), "2");
        assert_eq!(appointment.notes.as_deref(), Some("Bring lab results"));
    }

    #[test]
    fn test_hour_minute_truncates_seconds() {
        let start = date(2024, 3, 15).and_hms_opt(9, 0, 45).unwrap();
        let appointment = Appointment::at(7i64, start, 30).with_patient("John");
        assert_eq!(appointment.schedule.hour_minute(), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(appointment.patient_name.as_deref(), Some("John"));
    }
}
