//! Calendar navigation.
//!
//! Navigation is a pure transition on `CalendarFocus`: each call returns the
//! new focus and leaves the old one untouched. `CalendarSession` wraps a focus
//! for hosts that share it between threads, holding the lock across the
//! update and the render that follows it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use log::info;
use shared::{AppointmentRecord, AvailabilityRecord, CalendarFocus, CalendarViewKind, NavigationDirection};

use super::calendar::{CalendarService, RenderedCalendar};
use super::dates::{add_days, add_months_clamped};
use super::errors::CalendarError;

const DAYS_PER_WEEK: i64 = 7;

/// Move the focus one view-sized step.
///
/// Day view moves one day, week view seven days and month view one calendar
/// month, clamping the day of month (2024-01-31 + 1 month = 2024-02-29).
pub fn navigate(focus: &CalendarFocus, direction: NavigationDirection) -> Result<CalendarFocus, CalendarError> {
    let sign: i64 = match direction {
        NavigationDirection::Previous => -1,
        NavigationDirection::Next => 1,
    };

    let reference_date = match focus.view {
        CalendarViewKind::Day => add_days(focus.reference_date, sign)?,
        CalendarViewKind::Week => add_days(focus.reference_date, sign * DAYS_PER_WEEK)?,
        CalendarViewKind::Month => add_months_clamped(focus.reference_date, sign as i32)?,
    };

    Ok(CalendarFocus {
        reference_date,
        view: focus.view,
    })
}

/// Switch the view kind, keeping the reference date
pub fn set_view(focus: &CalendarFocus, view: CalendarViewKind) -> CalendarFocus {
    CalendarFocus {
        reference_date: focus.reference_date,
        view,
    }
}

/// Jump to a specific date, keeping the view kind
pub fn set_reference_date(focus: &CalendarFocus, reference_date: NaiveDate) -> CalendarFocus {
    CalendarFocus {
        reference_date,
        view: focus.view,
    }
}

/// Parse a view kind coming from an untyped caller
pub fn parse_view_kind(value: &str) -> Result<CalendarViewKind, CalendarError> {
    Ok(value.parse::<CalendarViewKind>()?)
}

/// Parse a navigation direction coming from an untyped caller
pub fn parse_direction(value: &str) -> Result<NavigationDirection, CalendarError> {
    Ok(value.parse::<NavigationDirection>()?)
}

/// A calendar focus owned by one session and shared behind a lock
#[derive(Clone)]
pub struct CalendarSession {
    focus: Arc<Mutex<CalendarFocus>>,
}

impl CalendarSession {
    pub fn new(focus: CalendarFocus) -> Self {
        Self {
            focus: Arc::new(Mutex::new(focus)),
        }
    }

    /// Get the current focus
    pub fn focus(&self) -> Result<CalendarFocus, CalendarError> {
        Ok(*self.lock()?)
    }

    /// Navigate one step and return the new focus
    pub fn navigate(&self, direction: NavigationDirection) -> Result<CalendarFocus, CalendarError> {
        let mut focus = self.lock()?;
        let next = navigate(&focus, direction)?;
        info!("🗓️ CALENDAR: Navigated {:?} from {} to {}", direction, focus.reference_date, next.reference_date);
        *focus = next;
        Ok(next)
    }

    pub fn set_view(&self, view: CalendarViewKind) -> Result<CalendarFocus, CalendarError> {
        let mut focus = self.lock()?;
        *focus = set_view(&focus, view);
        Ok(*focus)
    }

    pub fn set_reference_date(&self, reference_date: NaiveDate) -> Result<CalendarFocus, CalendarError> {
        let mut focus = self.lock()?;
        *focus = set_reference_date(&focus, reference_date);
        Ok(*focus)
    }

    /// Render the current focus
    pub fn render(
        &self,
        service: &CalendarService,
        today: NaiveDate,
        appointments: &[AppointmentRecord],
        availability: &[AvailabilityRecord],
    ) -> Result<RenderedCalendar, CalendarError> {
        let focus = self.lock()?;
        Ok(service.render(&focus, today, appointments, availability))
    }

    /// Navigate and render under a single lock, so no other caller can move
    /// the focus between the two steps
    pub fn navigate_and_render(
        &self,
        direction: NavigationDirection,
        service: &CalendarService,
        today: NaiveDate,
        appointments: &[AppointmentRecord],
        availability: &[AvailabilityRecord],
    ) -> Result<RenderedCalendar, CalendarError> {
        let mut focus = self.lock()?;
        *focus = navigate(&focus, direction)?;
        Ok(service.render(&focus, today, appointments, availability))
    }

    fn lock(&self) -> Result<MutexGuard<'_, CalendarFocus>, CalendarError> {
        self.focus
            .lock()
            .map_err(|e| CalendarError::StateUnavailable(e.to_string()))
    }
}
