//! Mappers for converting calendar domain models into shared display DTOs.

use shared::{AppointmentDetails, CalendarAppointment, CalendarAvailability};

use super::dates::{format_hour_minute, format_long_date};
use super::models::{Appointment, AvailabilitySlot};
use crate::config::CalendarConfig;

pub struct AppointmentMapper;

impl AppointmentMapper {
    pub fn to_dto(appointment: &Appointment, config: &CalendarConfig) -> CalendarAppointment {
        let patient_name = appointment
            .patient_name
            .clone()
            .unwrap_or_else(|| config.patient_placeholder.clone());
        let display_time = appointment
            .time()
            .map(format_hour_minute)
            .unwrap_or_else(|| config.time_placeholder.clone());

        CalendarAppointment {
            id: appointment.id.clone(),
            label: format!("{} - {}", display_time, patient_name),
            patient_name,
            date: appointment.date(),
            time: appointment.time(),
            display_time,
            status: appointment.status.code(),
            status_label: appointment.status.label(),
            duration_minutes: appointment.duration_minutes,
            notes: appointment.notes.clone(),
        }
    }

    /// Details shown when a single appointment is opened
    pub fn to_details(appointment: &Appointment) -> AppointmentDetails {
        AppointmentDetails {
            patient_name: appointment
                .patient_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            formatted_date: format_long_date(appointment.date()),
            formatted_time: appointment
                .time()
                .map(format_hour_minute)
                .unwrap_or_else(|| "Unknown Time".to_string()),
            status: appointment.status.label(),
            notes: appointment.notes.clone(),
        }
    }
}

pub struct AvailabilityMapper;

impl AvailabilityMapper {
    pub fn to_dto(slot: &AvailabilitySlot) -> CalendarAvailability {
        CalendarAvailability {
            date: slot.date,
            time: slot.time,
            label: format!("{} - Available", format_hour_minute(slot.time)),
        }
    }
}
