//! Working-day calendar.
//!
//! The workshop is closed one day a week (Sunday by default). Both the
//! segment splitter and the date-level availability search walk forward
//! over working days, never landing on the closure day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weekly working-day pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingCalendar {
    /// The weekday the workshop is closed.
    pub closed_weekday: Weekday,
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self {
            closed_weekday: Weekday::Sun,
        }
    }
}

impl WorkingCalendar {
    /// Creates a calendar closed on the given weekday.
    pub fn closed_on(closed_weekday: Weekday) -> Self {
        Self { closed_weekday }
    }

    /// Whether the workshop is open on a date.
    #[inline]
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        date.weekday() != self.closed_weekday
    }

    /// The given date if it is a working day, otherwise the next one.
    pub fn working_day_on_or_after(&self, date: NaiveDate) -> NaiveDate {
        let mut d = date;
        while !self.is_working_day(d) {
            d = d.succ_opt().expect("date within chrono range");
        }
        d
    }

    /// The first working day strictly after the given date.
    pub fn working_day_after(&self, date: NaiveDate) -> NaiveDate {
        self.working_day_on_or_after(date.succ_opt().expect("date within chrono range"))
    }
}
