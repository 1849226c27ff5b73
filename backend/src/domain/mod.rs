//! # Domain Module
//!
//! Contains the business logic of the appointment calendar.
//!
//! ## Module Organization
//!
//! - **calendar**: Month, week and day grid construction
//! - **navigation**: Focus transitions and the lock-protected calendar session
//! - **availability**: Replacing, generating and de-duplicating availability slots
//! - **ingestion**: Validation of raw appointment and availability records
//! - **mappers**: Conversion of domain models into shared display DTOs
//! - **models**: Validated appointment and availability models
//! - **dates**: Timezone-naive date parsing and arithmetic
//!
//! ## Business Rules
//!
//! - A month grid always holds 42 days starting on a Sunday
//! - Appointments take visual precedence over availability in the same slot
//! - Malformed records are skipped and logged, never fatal
//! - Month navigation clamps the day of month to the target month's length

pub mod availability;
pub mod calendar;
pub mod dates;
pub mod errors;
pub mod ingestion;
pub mod mappers;
pub mod models;
pub mod navigation;

pub use calendar::*;
pub use errors::*;
pub use ingestion::*;
pub use navigation::*;
