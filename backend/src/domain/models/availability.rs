//! Domain model for a doctor's availability slot.

use chrono::{NaiveDate, NaiveTime};
use shared::AvailabilityRecord;

use crate::domain::dates::{format_hour_minute, parse_calendar_date, parse_slot_time};
use crate::domain::errors::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityStatus {
    Available,
}

impl AvailabilityStatus {
    pub fn from_string(s: &str) -> Result<Self, RecordError> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            _ => Err(RecordError::UnsupportedStatus(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AvailabilityStatus,
}

impl AvailabilitySlot {
    pub fn available(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time,
            status: AvailabilityStatus::Available,
        }
    }

    pub fn from_record(record: &AvailabilityRecord) -> Result<Self, RecordError> {
        Ok(Self {
            date: parse_calendar_date(&record.date)?,
            time: parse_slot_time(&record.time)?,
            status: AvailabilityStatus::from_string(&record.status)?,
        })
    }

    pub fn to_record(&self) -> AvailabilityRecord {
        AvailabilityRecord {
            date: self.date.format("%Y-%m-%d").to_string(),
            time: format_hour_minute(self.time),
            status: self.status.as_str().to_string(),
        }
    }

    /// Grid key of this slot
    pub fn key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }
}
