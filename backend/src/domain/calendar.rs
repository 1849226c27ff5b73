//! Calendar domain logic for the appointment calendar.
//!
//! This module turns a reference date plus the doctor's appointments and
//! availability into render-ready grids. The UI only draws cells; every date
//! calculation (leading/trailing days, Sunday week alignment, slot matching,
//! appointment precedence over availability) happens here.
//!
//! Matching granularity differs per view: the month view matches on date, the
//! week view buckets timed appointments by hour and the day view matches the
//! exact half-hour slot.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use log::{debug, info};
use shared::{
    AppointmentDetails, AppointmentRecord, AvailabilityRecord, CalendarFocus, CalendarView, CalendarViewKind,
    DayCell, DayGrid, MonthGrid, TimeSlotCell, WeekGrid, WeekRow, WeekdayHeader,
};

use super::dates::{first_of_month, format_hour_minute, format_long_date, month_title, week_start, weekday_offset};
use super::errors::CalendarError;
use super::ingestion::{ingest_appointments, ingest_availability, RejectedRecord};
use super::mappers::{AppointmentMapper, AvailabilityMapper};
use super::models::{Appointment, AvailabilitySlot};
use crate::config::CalendarConfig;

/// Six weeks of seven days, whatever the month length or starting weekday
pub const MONTH_GRID_CELLS: usize = 42;

const DAYS_PER_WEEK: usize = 7;

/// A rendered view together with the input records that could not be placed
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCalendar {
    pub view: CalendarView,
    pub rejected_appointments: Vec<RejectedRecord>,
    pub rejected_availability: Vec<RejectedRecord>,
}

/// Calendar service that builds month, week and day grids
#[derive(Debug, Clone, Default)]
pub struct CalendarService {
    config: CalendarConfig,
}

impl CalendarService {
    /// Create a service after checking the configured windows
    pub fn new(config: CalendarConfig) -> Result<Self, CalendarError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Ingest raw records and render the view selected by `focus`
    pub fn render(
        &self,
        focus: &CalendarFocus,
        today: NaiveDate,
        appointments: &[AppointmentRecord],
        availability: &[AvailabilityRecord],
    ) -> RenderedCalendar {
        info!(
            "🗓️ CALENDAR: Rendering {} view around {} ({} appointments, {} availability slots)",
            focus.view,
            focus.reference_date,
            appointments.len(),
            availability.len()
        );

        let appointments = ingest_appointments(appointments, self.config.default_duration_minutes);
        let availability = ingest_availability(availability);

        let view = self.build_view(focus, today, &appointments.accepted, &availability.accepted);

        RenderedCalendar {
            view,
            rejected_appointments: appointments.rejected,
            rejected_availability: availability.rejected,
        }
    }

    /// Build the grid for the focus view kind from already validated models
    pub fn build_view(
        &self,
        focus: &CalendarFocus,
        today: NaiveDate,
        appointments: &[Appointment],
        availability: &[AvailabilitySlot],
    ) -> CalendarView {
        match focus.view {
            CalendarViewKind::Month => {
                CalendarView::Month(self.build_month_grid(focus.reference_date, today, appointments, availability))
            }
            CalendarViewKind::Week => {
                CalendarView::Week(self.build_week_grid(focus.reference_date, appointments, availability))
            }
            CalendarViewKind::Day => {
                CalendarView::Day(self.build_day_grid(focus.reference_date, appointments, availability))
            }
        }
    }

    /// Build the 42-cell month grid containing `reference_date`.
    ///
    /// The grid starts on the Sunday on or before the 1st, so it opens with the
    /// trailing days of the previous month and closes with the leading days of
    /// the next one.
    pub fn build_month_grid(
        &self,
        reference_date: NaiveDate,
        today: NaiveDate,
        appointments: &[Appointment],
        availability: &[AvailabilitySlot],
    ) -> MonthGrid {
        let first_day = first_of_month(reference_date);
        let offset = weekday_offset(first_day);
        let grid_start = first_day - Duration::days(i64::from(offset));

        debug!(
            "🗓️ CALENDAR DEBUG: Month grid for {} starts {} ({} leading days)",
            first_day, grid_start, offset
        );

        let appointments_by_day = self.group_appointments_by_day(appointments);
        let availability_by_day = self.group_availability_by_day(availability);

        let cells: Vec<DayCell> = grid_start
            .iter_days()
            .take(MONTH_GRID_CELLS)
            .map(|date| DayCell {
                date,
                day: date.day(),
                is_current_month: first_of_month(date) == first_day,
                is_today: date == today,
                appointments: appointments_by_day
                    .get(&date)
                    .map(|day| {
                        day.iter()
                            .map(|appointment| AppointmentMapper::to_dto(appointment, &self.config))
                            .collect()
                    })
                    .unwrap_or_default(),
                availability: availability_by_day
                    .get(&date)
                    .map(|day| day.iter().map(|slot| AvailabilityMapper::to_dto(slot)).collect())
                    .unwrap_or_default(),
            })
            .collect();

        let year = first_day.year();
        let month = first_day.month();

        MonthGrid {
            year,
            month,
            title: month_title(year, month),
            first_day_of_week: offset,
            cells,
        }
    }

    /// Build the Sunday-aligned week containing `reference_date`, one row per hour.
    ///
    /// Timed appointments land in the row of their start hour; minutes are not
    /// subdivided. Appointments without a time are not placed in this view.
    pub fn build_week_grid(
        &self,
        reference_date: NaiveDate,
        appointments: &[Appointment],
        availability: &[AvailabilitySlot],
    ) -> WeekGrid {
        let start = week_start(reference_date);
        let days: Vec<NaiveDate> = start.iter_days().take(DAYS_PER_WEEK).collect();

        let mut appointments_by_hour: HashMap<(NaiveDate, u32), Vec<&Appointment>> = HashMap::new();
        for appointment in appointments {
            if let Some(time) = appointment.time() {
                appointments_by_hour
                    .entry((appointment.date(), time.hour()))
                    .or_default()
                    .push(appointment);
            }
        }

        let available_hours: HashSet<(NaiveDate, u32)> =
            availability.iter().map(|slot| (slot.date, slot.time.hour())).collect();

        let header = days
            .iter()
            .map(|date| WeekdayHeader {
                date: *date,
                label: date.format("%a %-m/%-d").to_string(),
            })
            .collect();

        let rows = (self.config.week_start_hour..self.config.week_end_hour)
            .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
            .map(|time| {
                let hour = time.hour();
                let cells = days
                    .iter()
                    .map(|date| {
                        let occupants = appointments_by_hour.get(&(*date, hour));
                        self.time_slot_cell(*date, time, occupants, available_hours.contains(&(*date, hour)))
                    })
                    .collect();

                WeekRow {
                    time,
                    label: format_hour_minute(time),
                    cells,
                }
            })
            .collect();

        let week_end = days.last().copied().unwrap_or(start);

        WeekGrid {
            week_start: start,
            title: format!("{} - {}", format_long_date(start), format_long_date(week_end)),
            header,
            rows,
        }
    }

    /// Build the day view for `reference_date`, one row per configured slot (30 minutes by default).
    ///
    /// Appointments and availability must start exactly on the slot boundary to
    /// be placed in a row.
    pub fn build_day_grid(
        &self,
        reference_date: NaiveDate,
        appointments: &[Appointment],
        availability: &[AvailabilitySlot],
    ) -> DayGrid {
        let mut appointments_by_slot: HashMap<NaiveTime, Vec<&Appointment>> = HashMap::new();
        for appointment in appointments.iter().filter(|a| a.date() == reference_date) {
            if let Some(slot) = appointment.schedule.hour_minute() {
                appointments_by_slot.entry(slot).or_default().push(appointment);
            }
        }

        let available_slots: HashSet<NaiveTime> = availability
            .iter()
            .filter(|slot| slot.date == reference_date)
            .map(|slot| slot.time)
            .collect();

        let rows = self
            .day_slot_times()
            .into_iter()
            .map(|time| {
                self.time_slot_cell(
                    reference_date,
                    time,
                    appointments_by_slot.get(&time),
                    available_slots.contains(&time),
                )
            })
            .collect();

        DayGrid {
            date: reference_date,
            title: format!("{}, {}", reference_date.format("%A"), format_long_date(reference_date)),
            rows,
        }
    }

    /// Details for a single appointment, as shown when it is clicked
    pub fn appointment_details(&self, appointment: &Appointment) -> AppointmentDetails {
        AppointmentMapper::to_details(appointment)
    }

    /// Start times of the day view rows
    pub fn day_slot_times(&self) -> Vec<NaiveTime> {
        let step = Duration::minutes(i64::from(self.config.day_slot_minutes));
        let mut times = Vec::new();
        let mut current = self.config.day_start;

        while current < self.config.day_end {
            times.push(current);
            let (next, wrapped_seconds) = current.overflowing_add_signed(step);
            if wrapped_seconds != 0 {
                break;
            }
            current = next;
        }

        times
    }

    fn time_slot_cell(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        occupants: Option<&Vec<&Appointment>>,
        available: bool,
    ) -> TimeSlotCell {
        let appointments: Vec<_> = occupants
            .map(|list| {
                list.iter()
                    .map(|appointment| AppointmentMapper::to_dto(appointment, &self.config))
                    .collect()
            })
            .unwrap_or_default();

        TimeSlotCell {
            date,
            time,
            has_availability: available && appointments.is_empty(),
            appointments,
        }
    }

    /// Group appointments by calendar date, keeping input order within a day
    fn group_appointments_by_day<'a>(&self, appointments: &'a [Appointment]) -> HashMap<NaiveDate, Vec<&'a Appointment>> {
        let mut by_day: HashMap<NaiveDate, Vec<&Appointment>> = HashMap::new();
        for appointment in appointments {
            by_day.entry(appointment.date()).or_default().push(appointment);
        }
        by_day
    }

    fn group_availability_by_day<'a>(
        &self,
        availability: &'a [AvailabilitySlot],
    ) -> HashMap<NaiveDate, Vec<&'a AvailabilitySlot>> {
        let mut by_day: HashMap<NaiveDate, Vec<&AvailabilitySlot>> = HashMap::new();
        for slot in availability {
            by_day.entry(slot.date).or_default().push(slot);
        }
        by_day
    }
}
