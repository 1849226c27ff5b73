use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Appointment identifier as sent by the booking backend (numeric or textual)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// Appointment as delivered by the REST collaborator, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub id: RecordId,
    #[serde(default)]
    pub patient_name: Option<String>,
    /// Calendar date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    /// Combined date and time (YYYY-MM-DDTHH:MM[:SS])
    #[serde(default)]
    pub appointment_time: Option<String>,
    /// 0 = scheduled, any other code is passed through untouched; absent or null means scheduled
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A doctor's open slot as delivered by the REST collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Slot start (HH:MM)
    pub time: String,
    #[serde(default = "default_availability_status")]
    pub status: String,
}

fn default_availability_status() -> String {
    "available".to_string()
}

/// Granularity of the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarViewKind {
    Day,
    Week,
    Month,
}

impl CalendarViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarViewKind::Day => "day",
            CalendarViewKind::Week => "week",
            CalendarViewKind::Month => "month",
        }
    }
}

impl fmt::Display for CalendarViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarViewKind {
    type Err = ParseCalendarArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(CalendarViewKind::Day),
            "week" => Ok(CalendarViewKind::Week),
            "month" => Ok(CalendarViewKind::Month),
            _ => Err(ParseCalendarArgError::ViewKind(s.to_string())),
        }
    }
}

/// Direction of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Previous,
    Next,
}

impl FromStr for NavigationDirection {
    type Err = ParseCalendarArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "previous" | "prev" => Ok(NavigationDirection::Previous),
            "next" => Ok(NavigationDirection::Next),
            _ => Err(ParseCalendarArgError::Direction(s.to_string())),
        }
    }
}

/// Error returned when a view kind or direction string is not recognised
#[derive(Debug, Clone, PartialEq)]
pub enum ParseCalendarArgError {
    ViewKind(String),
    Direction(String),
}

impl fmt::Display for ParseCalendarArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCalendarArgError::ViewKind(value) => {
                write!(f, "Invalid view kind: '{}'. Must be one of: day, week, month", value)
            }
            ParseCalendarArgError::Direction(value) => {
                write!(f, "Invalid navigation direction: '{}'. Must be previous or next", value)
            }
        }
    }
}

impl std::error::Error for ParseCalendarArgError {}

/// The caller-owned navigation state: which date the grid is anchored on and how it is sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFocus {
    pub reference_date: NaiveDate,
    pub view: CalendarViewKind,
}

impl CalendarFocus {
    pub fn new(reference_date: NaiveDate, view: CalendarViewKind) -> Self {
        Self { reference_date, view }
    }
}

/// An appointment prepared for display inside a calendar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarAppointment {
    pub id: RecordId,
    pub patient_name: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    /// "HH:MM", or a placeholder when the appointment has no time
    pub display_time: String,
    /// "<display_time> - <patient_name>"
    pub label: String,
    pub status: i32,
    pub status_label: String,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

/// An availability slot prepared for display inside a calendar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarAvailability {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub label: String,
}

/// One square of the month view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub appointments: Vec<CalendarAppointment>,
    pub availability: Vec<CalendarAvailability>,
}

/// One row/column intersection of the week or day view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotCell {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointments: Vec<CalendarAppointment>,
    /// An availability slot exists at this key and no appointment occupies it
    pub has_availability: bool,
}

/// Month view: always 6 weeks of 7 days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
    pub cells: Vec<DayCell>,
}

/// Column header of the week view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayHeader {
    pub date: NaiveDate,
    pub label: String,
}

/// One hourly row of the week view, one cell per weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    pub time: NaiveTime,
    pub label: String,
    pub cells: Vec<TimeSlotCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub title: String,
    pub header: Vec<WeekdayHeader>,
    pub rows: Vec<WeekRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub title: String,
    pub rows: Vec<TimeSlotCell>,
}

/// A rendered grid for whichever view kind was requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum CalendarView {
    Day(DayGrid),
    Week(WeekGrid),
    Month(MonthGrid),
}

impl CalendarView {
    pub fn kind(&self) -> CalendarViewKind {
        match self {
            CalendarView::Day(_) => CalendarViewKind::Day,
            CalendarView::Week(_) => CalendarViewKind::Week,
            CalendarView::Month(_) => CalendarViewKind::Month,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarView::Day(grid) => &grid.title,
            CalendarView::Week(grid) => &grid.title,
            CalendarView::Month(grid) => &grid.title,
        }
    }
}

/// Human-readable details shown when an appointment is opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub patient_name: String,
    pub formatted_date: String,
    pub formatted_time: String,
    pub status: String,
    pub notes: Option<String>,
}

/// Request to replace a doctor's availability for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAvailabilityRequest {
    pub date: String,
    pub times: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment_record_from_json() {
        let json = r#"{
            "id": 42,
            "patientName": "Jane Doe",
            "appointmentTime": "2024-03-15T09:00:00",
            "status": 0
        }"#;

        let record: AppointmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::Number(42));
        assert_eq!(record.patient_name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.appointment_time.as_deref(), Some("2024-03-15T09:00:00"));
        assert!(record.date.is_none());
        assert!(record.duration_minutes.is_none());
    }

    #[test]
    fn test_appointment_record_minimal_json() {
        let record: AppointmentRecord =
            serde_json::from_str(r#"{"id": "apt-7", "date": "2024-03-15"}"#).unwrap();
        assert_eq!(record.id, RecordId::Text("apt-7".to_string()));
        assert_eq!(record.status, None);
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_appointment_record_null_fields() {
        let record: AppointmentRecord = serde_json::from_str(
            r#"{"id": 8, "patientName": null, "date": "2024-03-15", "status": null, "durationMinutes": null}"#,
        )
        .unwrap();
        assert_eq!(record.status, None);
        assert!(record.patient_name.is_none());
    }

    #[test]
    fn test_availability_record_default_status() {
        let record: AvailabilityRecord =
            serde_json::from_str(r#"{"date": "2024-03-15", "time": "09:00"}"#).unwrap();
        assert_eq!(record.status, "available");
    }

    #[test]
    fn test_view_kind_parsing() {
        assert_eq!("day".parse::<CalendarViewKind>().unwrap(), CalendarViewKind::Day);
        assert_eq!("Week".parse::<CalendarViewKind>().unwrap(), CalendarViewKind::Week);
        assert_eq!(" month ".parse::<CalendarViewKind>().unwrap(), CalendarViewKind::Month);

        let err = "year".parse::<CalendarViewKind>().unwrap_err();
        assert_eq!(err, ParseCalendarArgError::ViewKind("year".to_string()));
        assert!(err.to_string().contains("Invalid view kind"));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("next".parse::<NavigationDirection>().unwrap(), NavigationDirection::Next);
        assert_eq!("prev".parse::<NavigationDirection>().unwrap(), NavigationDirection::Previous);
        assert!("sideways".parse::<NavigationDirection>().is_err());
    }

    #[test]
    fn test_calendar_view_serializes_with_tag() {
        let view = CalendarView::Day(DayGrid {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            title: "Friday, March 15, 2024".to_string(),
            rows: Vec::new(),
        });

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["view"], "day");
        assert_eq!(value["date"], "2024-03-15");
        assert_eq!(view.kind(), CalendarViewKind::Day);
    }
}
