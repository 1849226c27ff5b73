//! Calendar layout configuration.
//!
//! Defaults match the clinic's working day: the week view shows hourly rows
//! from 08:00 to 17:00 and the day view shows half-hour rows from 08:00 to
//! 17:30. Every field can be overridden from a YAML file; missing fields keep
//! their defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::errors::CalendarError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// First hourly row of the week view
    pub week_start_hour: u32,
    /// Hour at which the week view stops (exclusive)
    pub week_end_hour: u32,
    /// First row of the day view
    pub day_start: NaiveTime,
    /// Time at which the day view stops (exclusive)
    pub day_end: NaiveTime,
    /// Row granularity of the day view
    pub day_slot_minutes: u32,
    /// Duration assumed when an appointment does not carry one
    pub default_duration_minutes: u32,
    /// Shown instead of a time for appointments that only have a date
    pub time_placeholder: String,
    /// Shown instead of a patient name when none is provided
    pub patient_placeholder: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start_hour: 8,
            week_end_hour: 18,
            day_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            day_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            day_slot_minutes: 30,
            default_duration_minutes: 30,
            time_placeholder: "TBD".to_string(),
            patient_placeholder: "Patient".to_string(),
        }
    }
}

impl CalendarConfig {
    /// Parse a YAML document and validate the result
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CalendarConfig =
            serde_yaml::from_str(yaml).context("Failed to parse calendar configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read calendar configuration {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check that the configured windows produce a usable grid
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.week_end_hour > 24 || self.week_start_hour >= self.week_end_hour {
            return Err(CalendarError::InvalidConfig(format!(
                "week hours {}..{} are not a valid window",
                self.week_start_hour, self.week_end_hour
            )));
        }

        if self.day_start >= self.day_end {
            return Err(CalendarError::InvalidConfig(format!(
                "day window {}..{} is empty",
                self.day_start, self.day_end
            )));
        }

        if self.day_slot_minutes == 0 || 60 % self.day_slot_minutes != 0 {
            return Err(CalendarError::InvalidConfig(format!(
                "day slot of {} minutes does not divide an hour",
                self.day_slot_minutes
            )));
        }

        if self.day_start.minute() % self.day_slot_minutes != 0 || self.day_start.second() != 0 {
            return Err(CalendarError::InvalidConfig(format!(
                "day start {} is not aligned to {}-minute slots",
                self.day_start, self.day_slot_minutes
            )));
        }

        if self.default_duration_minutes == 0 {
            return Err(CalendarError::InvalidConfig(
                "default appointment duration must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = CalendarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.week_start_hour, 8);
        assert_eq!(config.week_end_hour, 18);
        assert_eq!(config.day_slot_minutes, 30);
        assert_eq!(config.time_placeholder, "TBD");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CalendarConfig::from_yaml_str("week_start_hour: 7\ntime_placeholder: \"--:--\"\n").unwrap();
        assert_eq!(config.week_start_hour, 7);
        assert_eq!(config.week_end_hour, 18);
        assert_eq!(config.time_placeholder, "--:--");
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn test_day_window_from_yaml() {
        let config =
            CalendarConfig::from_yaml_str("day_start: \"09:00:00\"\nday_end: \"12:00:00\"\nday_slot_minutes: 15\n")
                .unwrap();
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(config.day_end, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(config.day_slot_minutes, 15);
    }

    #[test]
    fn test_invalid_windows_rejected() {
        assert!(CalendarConfig::from_yaml_str("week_start_hour: 18\nweek_end_hour: 8\n").is_err());
        assert!(CalendarConfig::from_yaml_str("day_slot_minutes: 25\n").is_err());
        assert!(CalendarConfig::from_yaml_str("day_slot_minutes: 0\n").is_err());
        assert!(CalendarConfig::from_yaml_str("default_duration_minutes: 0\n").is_err());

        let config = CalendarConfig {
            day_start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            ..CalendarConfig::default()
        };
        assert!(matches!(config.validate(), Err(CalendarError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_duration_minutes: 45").unwrap();
        writeln!(file, "patient_placeholder: Unknown").unwrap();

        let config = CalendarConfig::load(file.path()).unwrap();
        assert_eq!(config.default_duration_minutes, 45);
        assert_eq!(config.patient_placeholder, "Unknown");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = CalendarConfig::load(&dir.path().join("missing.yaml"));
        assert!(result.is_err());
    }
}
