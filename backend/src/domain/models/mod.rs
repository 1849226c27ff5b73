pub mod appointment;
pub mod availability;

pub use appointment::{Appointment, AppointmentSchedule, AppointmentStatus};
pub use availability::{AvailabilitySlot, AvailabilityStatus};
