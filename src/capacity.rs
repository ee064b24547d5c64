//! Day-level capacity tracking.
//!
//! For an entity and date, computes committed hours from all active
//! segments, subtracts absence-driven reduction from the capacity ceiling,
//! and classifies the resulting load. Read-only; queried before and after
//! speculative placements and by the splitter's day-walking.
//!
//! # Absence Cost
//! Each pending or approved absence covering a date costs one full working
//! day ([`FULL_DAY_ABSENCE_HOURS`]) of that entity's capacity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AbsenceRequest, EntityConfig, JobSegment};

/// Capacity cost of one absent person for one day, in hours.
pub const FULL_DAY_ABSENCE_HOURS: f64 = 8.0;

/// Load classification for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadLevel {
    /// Comfortable headroom.
    Normal,
    /// At or above the warning ratio of effective capacity.
    HighLoad,
    /// Committed hours exceed effective capacity.
    Overloaded,
}

/// Snapshot of one day's load for an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    /// The day being reported.
    pub date: NaiveDate,
    /// Hours of active segments counted against this day.
    pub committed_hours: f64,
    /// Configured capacity ceiling.
    pub max_capacity_hours: f64,
    /// Ceiling minus absence reduction, floored at zero.
    pub effective_capacity_hours: f64,
    /// Classification of committed against effective capacity.
    pub level: LoadLevel,
}

impl DailyLoad {
    /// Hours still bookable on this day.
    #[inline]
    pub fn remaining_hours(&self) -> f64 {
        (self.effective_capacity_hours - self.committed_hours).max(0.0)
    }

    /// Whether `hours` more can be committed without overloading.
    pub fn fits(&self, hours: f64) -> bool {
        self.committed_hours + hours <= self.effective_capacity_hours + f64::EPSILON
    }
}

/// Sums absence reduction for a date: one full-day cost per pending or
/// approved request covering it.
pub fn absence_hours(absences: &[AbsenceRequest], date: NaiveDate) -> f64 {
    let absent = absences
        .iter()
        .filter(|a| a.reduces_capacity() && a.covers(date))
        .count();
    absent as f64 * FULL_DAY_ABSENCE_HOURS
}

/// Sums the duration of active segments counted against a date.
///
/// A segment counts on its scheduled date once placed, otherwise on the
/// planned date assigned by the splitter.
pub fn committed_hours_on<'a, I>(segments: I, date: NaiveDate) -> f64
where
    I: IntoIterator<Item = &'a JobSegment>,
{
    segments
        .into_iter()
        .filter(|s| s.is_active() && s.effective_date() == date)
        .map(|s| s.duration_hours)
        .sum()
}

/// Builds the day's load report for an entity.
pub fn daily_load(
    date: NaiveDate,
    committed_hours: f64,
    config: &EntityConfig,
    absences: &[AbsenceRequest],
) -> DailyLoad {
    let max = config.daily_capacity_hours;
    let effective = (max - absence_hours(absences, date)).max(0.0);
    let level = classify(committed_hours, effective, config.high_load_ratio);
    DailyLoad {
        date,
        committed_hours,
        max_capacity_hours: max,
        effective_capacity_hours: effective,
        level,
    }
}

fn classify(committed: f64, effective: f64, high_load_ratio: f64) -> LoadLevel {
    if committed > effective + f64::EPSILON {
        LoadLevel::Overloaded
    } else if effective > 0.0 && committed / effective >= high_load_ratio {
        LoadLevel::HighLoad
    } else {
        LoadLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn cfg() -> EntityConfig {
        EntityConfig::new("E1", 40.0)
    }

    #[test]
    fn test_normal_load() {
        let load = daily_load(d(2025, 3, 10), 30.0, &cfg(), &[]);
        assert_eq!(load.level, LoadLevel::Normal); // 30/40 = 0.75
        assert!((load.effective_capacity_hours - 40.0).abs() < 1e-10);
        assert!((load.remaining_hours() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_high_load_at_ratio() {
        let load = daily_load(d(2025, 3, 10), 32.0, &cfg(), &[]);
        assert_eq!(load.level, LoadLevel::HighLoad); // exactly 0.8
    }

    #[test]
    fn test_overloaded() {
        let load = daily_load(d(2025, 3, 10), 41.0, &cfg(), &[]);
        assert_eq!(load.level, LoadLevel::Overloaded);
        assert!((load.remaining_hours() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_absence_lowers_threshold() {
        let date = d(2025, 3, 10);
        let one_absent = vec![AbsenceRequest::new("A1", "W1", date, date)];

        // 30h committed: Normal without the absence...
        let without = daily_load(date, 30.0, &cfg(), &[]);
        assert_eq!(without.level, LoadLevel::Normal);

        // ...but 30/32 with one person out → high load
        let with_one = daily_load(date, 30.0, &cfg(), &one_absent);
        assert!((with_one.effective_capacity_hours - 32.0).abs() < 1e-10);
        assert_eq!(with_one.level, LoadLevel::HighLoad);

        // Two out → effective 24h < 30h committed → overloaded
        let two_absent = vec![
            AbsenceRequest::new("A1", "W1", date, date),
            AbsenceRequest::new("A2", "W2", date, date),
        ];
        let with_two = daily_load(date, 30.0, &cfg(), &two_absent);
        assert_eq!(with_two.level, LoadLevel::Overloaded);
    }

    #[test]
    fn test_declined_absence_ignored() {
        let date = d(2025, 3, 10);
        let mut req = AbsenceRequest::new("A1", "W1", date, date);
        req.decline();
        assert!((absence_hours(&[req], date) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_pending_absence_counts() {
        let date = d(2025, 3, 10);
        let req = AbsenceRequest::new("A1", "W1", date, date);
        assert!((absence_hours(&[req], date) - FULL_DAY_ABSENCE_HOURS).abs() < 1e-10);
    }

    #[test]
    fn test_effective_capacity_floors_at_zero() {
        let date = d(2025, 3, 10);
        let cfg = EntityConfig::new("E1", 8.0);
        let absences = vec![
            AbsenceRequest::new("A1", "W1", date, date),
            AbsenceRequest::new("A2", "W2", date, date),
        ];
        let load = daily_load(date, 2.0, &cfg, &absences);
        assert!((load.effective_capacity_hours - 0.0).abs() < 1e-10);
        assert_eq!(load.level, LoadLevel::Overloaded);
    }

    #[test]
    fn test_committed_hours_uses_effective_date() {
        use crate::models::SegmentStatus;

        let date = d(2025, 3, 10);
        let planned = JobSegment::new("S1", "J1", 3.0, date);

        let mut placed = JobSegment::new("S2", "J2", 2.0, d(2025, 3, 11));
        placed.date = Some(date);
        placed.status = SegmentStatus::Allocated;

        let mut cancelled = JobSegment::new("S3", "J3", 5.0, date);
        cancelled.status = SegmentStatus::Cancelled;

        let segments = [planned, placed, cancelled];
        let committed = committed_hours_on(segments.iter(), date);
        assert!((committed - 5.0).abs() < 1e-10); // 3 planned + 2 placed, cancelled excluded
    }

    #[test]
    fn test_fits() {
        let load = daily_load(d(2025, 3, 10), 36.0, &cfg(), &[]);
        assert!(load.fits(4.0));
        assert!(!load.fits(4.5));
    }
}
