//! # Appointment Calendar Backend
//!
//! Builds the doctor calendar shown by the booking front end: month, week and
//! day grids with appointments and availability laid onto them, plus the
//! navigation state that moves between them.
//!
//! The crate performs no I/O in its domain layer. Callers fetch appointment and
//! availability records however they like, hand them to a `CalendarService`,
//! and draw the returned cells.

pub mod config;
pub mod domain;

pub use config::CalendarConfig;
pub use domain::{CalendarError, CalendarService, CalendarSession, RenderedCalendar};
