//! Doctor availability management.
//!
//! Availability is owned by the caller; these helpers only compute the new
//! list of slots, they never store anything.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use log::info;
use shared::SetAvailabilityRequest;

use super::dates::{add_days, parse_calendar_date, parse_slot_time};
use super::errors::CalendarError;
use super::models::AvailabilitySlot;

/// Default opening hours used when generating sample availability
pub const SAMPLE_SLOT_TIMES: [(u32, u32); 4] = [(9, 0), (10, 0), (13, 0), (14, 0)];

/// Replace every slot on `date` with the selected `times`.
///
/// Slots on other dates are kept in their original order and the new slots are
/// appended. Duplicate selections collapse to one slot.
pub fn set_availability_for_date(
    existing: &[AvailabilitySlot],
    date: &str,
    times: &[String],
) -> Result<Vec<AvailabilitySlot>, CalendarError> {
    if times.is_empty() {
        return Err(CalendarError::NoTimesSelected);
    }

    let date = parse_calendar_date(date).map_err(|_| CalendarError::InvalidDate(date.to_string()))?;
    let selected = times
        .iter()
        .map(|time| parse_slot_time(time).map_err(|_| CalendarError::InvalidTime(time.clone())))
        .collect::<Result<Vec<NaiveTime>, CalendarError>>()?;

    let mut updated: Vec<AvailabilitySlot> = existing.iter().filter(|slot| slot.date != date).copied().collect();
    updated.extend(selected.into_iter().map(|time| AvailabilitySlot::available(date, time)));

    info!("Availability for {} set to {} slots", date, times.len());
    Ok(dedup_slots(&updated))
}

/// Apply a save request coming from the availability editor
pub fn apply_availability_request(
    existing: &[AvailabilitySlot],
    request: &SetAvailabilityRequest,
) -> Result<Vec<AvailabilitySlot>, CalendarError> {
    set_availability_for_date(existing, &request.date, &request.times)
}

/// Weekday sample availability for the `days` days starting at `today`
pub fn generate_sample_availability(today: NaiveDate, days: u32) -> Result<Vec<AvailabilitySlot>, CalendarError> {
    let mut slots = Vec::new();

    for offset in 0..days {
        let date = add_days(today, i64::from(offset))?;
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        slots.extend(
            SAMPLE_SLOT_TIMES
                .iter()
                .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(*hour, *minute, 0))
                .map(|time| AvailabilitySlot::available(date, time)),
        );
    }

    Ok(slots)
}

/// Keep the first slot for each (date, time) pair, preserving order.
///
/// Useful when several doctors' availability is merged into one calendar.
pub fn dedup_slots(slots: &[AvailabilitySlot]) -> Vec<AvailabilitySlot> {
    let mut seen = HashSet::new();
    slots.iter().filter(|slot| seen.insert(slot.key())).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn times(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_set_availability_replaces_only_that_date() {
        let existing = vec![
            AvailabilitySlot::available(date(2024, 3, 14), time(9, 0)),
            AvailabilitySlot::available(date(2024, 3, 15), time(9, 0)),
            AvailabilitySlot::available(date(2024, 3, 15), time(10, 0)),
        ];

        let updated = set_availability_for_date(&existing, "2024-03-15", &times(&["13:00", "14:30"])).unwrap();

        assert_eq!(
            updated,
            vec![
                AvailabilitySlot::available(date(2024, 3, 14), time(9, 0)),
                AvailabilitySlot::available(date(2024, 3, 15), time(13, 0)),
                AvailabilitySlot::available(date(2024, 3, 15), time(14, 30)),
            ]
        );
    }

    #[test]
    fn test_set_availability_requires_a_selection() {
        assert_eq!(
            set_availability_for_date(&[], "2024-03-15", &[]),
            Err(CalendarError::NoTimesSelected)
        );
    }

    #[test]
    fn test_set_availability_rejects_bad_input() {
        assert_eq!(
            set_availability_for_date(&[], "15/03/2024", &times(&["09:00"])),
            Err(CalendarError::InvalidDate("15/03/2024".to_string()))
        );
        assert_eq!(
            set_availability_for_date(&[], "2024-03-15", &times(&["09:00", "noon"])),
            Err(CalendarError::InvalidTime("noon".to_string()))
        );
    }

    #[test]
    fn test_duplicate_selection_collapses() {
        let updated = set_availability_for_date(&[], "2024-03-15", &times(&["09:00", "09:00"])).unwrap();
        assert_eq!(updated.len(), 1);
    }

    #[test]
    fn test_sample_availability_skips_weekends() {
        // 2024-03-15 is a Friday: Fri, (Sat, Sun skipped), Mon, Tue
        let slots = generate_sample_availability(date(2024, 3, 15), 5).unwrap();
        assert_eq!(slots.len(), 3 * SAMPLE_SLOT_TIMES.len());

        let dates: HashSet<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert!(dates.contains(&date(2024, 3, 15)));
        assert!(!dates.contains(&date(2024, 3, 16)));
        assert!(!dates.contains(&date(2024, 3, 17)));
        assert!(dates.contains(&date(2024, 3, 19)));

        let friday: Vec<NaiveTime> = slots.iter().filter(|s| s.date == date(2024, 3, 15)).map(|s| s.time).collect();
        assert_eq!(friday, vec![time(9, 0), time(10, 0), time(13, 0), time(14, 0)]);
    }

    #[test]
    fn test_apply_request_from_json() {
        let request: SetAvailabilityRequest =
            serde_json::from_str(r#"{"date": "2024-03-15", "times": ["09:00", "09:30"]}"#).unwrap();
        let updated = apply_availability_request(&[], &request).unwrap();
        assert_eq!(updated.len(), 2);
        assert!(updated.iter().all(|slot| slot.date == date(2024, 3, 15)));

        let empty = SetAvailabilityRequest { date: "2024-03-15".to_string(), times: vec![] };
        assert!(matches!(apply_availability_request(&updated, &empty), Err(CalendarError::NoTimesSelected)));
    }

    #[test]
    fn test_dedup_slots_keeps_first() {
        let slots = vec![
            AvailabilitySlot::available(date(2024, 3, 15), time(9, 0)),
            AvailabilitySlot::available(date(2024, 3, 15), time(10, 0)),
            AvailabilitySlot::available(date(2024, 3, 15), time(9, 0)),
        ];
        assert_eq!(dedup_slots(&slots), slots[..2].to_vec());
    }
}
