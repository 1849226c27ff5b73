//! Turns raw wire records into validated domain models.
//!
//! A bad record never aborts a render: it is dropped, logged, and reported
//! back in `Ingested::rejected` so the caller can surface it if it wants to.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{AppointmentRecord, AvailabilityRecord};

use super::errors::RecordError;
use super::models::{Appointment, AvailabilitySlot};

/// A record that could not be placed on the calendar
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Appointment id, or "date time" for availability slots
    pub source: String,
    pub reason: RecordError,
}

/// Outcome of ingesting a batch of records
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<T> {
    /// Valid records, in input order
    pub accepted: Vec<T>,
    pub rejected: Vec<RejectedRecord>,
}

impl<T> Default for Ingested<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Decode a JSON array of wire records one element at a time.
///
/// An element that does not fit the record shape (missing field, wrong type,
/// not an object) is rejected on its own. Only a document that is not a JSON
/// array at all is an error.
pub fn decode_records<T: DeserializeOwned>(json: &str) -> Result<Ingested<T>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    let mut result = Ingested::default();

    for (index, value) in values.into_iter().enumerate() {
        let source = record_source(&value, index);
        match serde_json::from_value::<T>(value) {
            Ok(record) => result.accepted.push(record),
            Err(err) => {
                warn!("Skipping undecodable record {}: {}", source, err);
                result.rejected.push(RejectedRecord {
                    source,
                    reason: RecordError::Undecodable(err.to_string()),
                });
            }
        }
    }

    Ok(result)
}

/// The record's id when it has a usable one, otherwise its array position
fn record_source(value: &Value, index: usize) -> String {
    match value.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => format!("#{}", index),
    }
}

pub fn ingest_appointments(records: &[AppointmentRecord], default_duration_minutes: u32) -> Ingested<Appointment> {
    let mut result = Ingested::default();

    for record in records {
        match Appointment::from_record(record, default_duration_minutes) {
            Ok(appointment) => result.accepted.push(appointment),
            Err(reason) => {
                warn!("Skipping appointment {}: {}", record.id, reason);
                result.rejected.push(RejectedRecord {
                    source: record.id.to_string(),
                    reason,
                });
            }
        }
    }

    debug!(
        "Ingested {} appointments ({} rejected)",
        result.accepted.len(),
        result.rejected.len()
    );
    result
}

pub fn ingest_availability(records: &[AvailabilityRecord]) -> Ingested<AvailabilitySlot> {
    let mut result = Ingested::default();

    for record in records {
        match AvailabilitySlot::from_record(record) {
            Ok(slot) => result.accepted.push(slot),
            Err(reason) => {
                warn!("Skipping availability slot {} {}: {}", record.date, record.time, reason);
                result.rejected.push(RejectedRecord {
                    source: format!("{} {}", record.date, record.time),
                    reason,
                });
            }
        }
    }

    debug!(
        "Ingested {} availability slots ({} rejected)",
        result.accepted.len(),
        result.rejected.len()
    );
    result
}
