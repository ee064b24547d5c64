//! Segment splitter.
//!
//! Turns a job's estimated hours into one or more unallocated segments,
//! each planned for a specific working day. Days are walked forward from
//! the requested start date, each day absorbing at most its remaining
//! capacity (ceiling minus hours already committed by existing segments),
//! with overflow rolling onto the next working day.
//!
//! Splitting never fails: a non-positive estimate is treated as one hour,
//! and a zero-capacity entity gets the whole estimate as a single segment
//! on the start date.

use chrono::NaiveDate;

use crate::calendar::WorkingCalendar;
use crate::capacity::committed_hours_on;
use crate::models::{EntityConfig, JobSegment};

/// Durations below this are treated as zero when chunking.
const EPSILON_HOURS: f64 = 1e-9;

/// Hard ceiling on the day-walk, to bound pathological inputs.
const MAX_SPLIT_HORIZON_DAYS: usize = 3_650;

/// Splits `estimated_hours` of labor into planned, unallocated segments.
///
/// `existing` is the entity's current segment set, used to measure how much
/// of each day's capacity is already committed. Produced segment ids are
/// `"{job_id}-S{n}"`, numbered from 1 in date order.
pub fn split_job(
    job_id: &str,
    estimated_hours: f64,
    start_date: NaiveDate,
    config: &EntityConfig,
    existing: &[&JobSegment],
    calendar: &WorkingCalendar,
) -> Vec<JobSegment> {
    // At least one schedulable segment must exist
    let mut remaining = if estimated_hours > 0.0 {
        estimated_hours
    } else {
        1.0
    };

    let mut date = calendar.working_day_on_or_after(start_date);

    if config.daily_capacity_hours <= 0.0 {
        return vec![JobSegment::new(format!("{job_id}-S1"), job_id, remaining, date)];
    }

    let mut segments = Vec::new();
    let mut seq = 1usize;

    for _ in 0..MAX_SPLIT_HORIZON_DAYS {
        if remaining <= EPSILON_HOURS {
            break;
        }

        let committed = committed_hours_on(existing.iter().copied(), date);
        let free = config.daily_capacity_hours - committed;
        if free > EPSILON_HOURS {
            let chunk = remaining.min(free);
            segments.push(JobSegment::new(
                format!("{job_id}-S{seq}"),
                job_id,
                chunk,
                date,
            ));
            seq += 1;
            remaining -= chunk;
        }

        date = calendar.working_day_after(date);
    }

    // Horizon exhausted with hours left: dump the remainder on the last
    // walked date rather than lose it.
    if remaining > EPSILON_HOURS {
        segments.push(JobSegment::new(
            format!("{job_id}-S{seq}"),
            job_id,
            remaining,
            date,
        ));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SegmentStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn cfg(hours: f64) -> EntityConfig {
        EntityConfig::new("E1", hours)
    }

    fn total_hours(segments: &[JobSegment]) -> f64 {
        segments.iter().map(|s| s.duration_hours).sum()
    }

    #[test]
    fn test_single_day_fit() {
        // 2025-03-10 is a Monday
        let segs = split_job("J1", 6.0, d(2025, 3, 10), &cfg(8.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].id, "J1-S1");
        assert_eq!(segs[0].planned_date, d(2025, 3, 10));
        assert!((segs[0].duration_hours - 6.0).abs() < 1e-10);
        assert_eq!(segs[0].status, SegmentStatus::Unallocated);
        assert!(!segs[0].is_placed());
    }

    #[test]
    fn test_overflow_rolls_to_next_day() {
        // 12h against an 8h ceiling → 8h Monday + 4h Tuesday
        let segs = split_job("J1", 12.0, d(2025, 3, 10), &cfg(8.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 2);
        assert!((segs[0].duration_hours - 8.0).abs() < 1e-10);
        assert_eq!(segs[0].planned_date, d(2025, 3, 10));
        assert!((segs[1].duration_hours - 4.0).abs() < 1e-10);
        assert_eq!(segs[1].planned_date, d(2025, 3, 11));
        assert!((total_hours(&segs) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_overflow_skips_sunday() {
        // Saturday 2025-03-08 start, 12h: 8h Saturday, remainder on Monday
        let segs = split_job("J1", 12.0, d(2025, 3, 8), &cfg(8.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].planned_date, d(2025, 3, 8));
        assert_eq!(segs[1].planned_date, d(2025, 3, 10));
    }

    #[test]
    fn test_start_on_sunday_rolls_forward() {
        let segs = split_job("J1", 4.0, d(2025, 3, 9), &cfg(8.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].planned_date, d(2025, 3, 10));
    }

    #[test]
    fn test_existing_commitments_shrink_first_day() {
        let busy = JobSegment::new("X-S1", "X", 6.0, d(2025, 3, 10));
        let existing = [&busy];
        let segs = split_job("J1", 5.0, d(2025, 3, 10), &cfg(8.0), &existing, &WorkingCalendar::default());
        // Only 2h free Monday, 3h rolls to Tuesday
        assert_eq!(segs.len(), 2);
        assert!((segs[0].duration_hours - 2.0).abs() < 1e-10);
        assert!((segs[1].duration_hours - 3.0).abs() < 1e-10);
        assert_eq!(segs[1].planned_date, d(2025, 3, 11));
    }

    #[test]
    fn test_full_day_skipped_entirely() {
        let busy = JobSegment::new("X-S1", "X", 8.0, d(2025, 3, 10));
        let existing = [&busy];
        let segs = split_job("J1", 3.0, d(2025, 3, 10), &cfg(8.0), &existing, &WorkingCalendar::default());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].planned_date, d(2025, 3, 11));
    }

    #[test]
    fn test_cancelled_segments_free_their_day() {
        let mut gone = JobSegment::new("X-S1", "X", 8.0, d(2025, 3, 10));
        gone.status = SegmentStatus::Cancelled;
        let existing = [&gone];
        let segs = split_job("J1", 3.0, d(2025, 3, 10), &cfg(8.0), &existing, &WorkingCalendar::default());
        assert_eq!(segs[0].planned_date, d(2025, 3, 10));
    }

    #[test]
    fn test_non_positive_estimate_becomes_one_hour() {
        let segs = split_job("J1", 0.0, d(2025, 3, 10), &cfg(8.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 1);
        assert!((segs[0].duration_hours - 1.0).abs() < 1e-10);

        let segs = split_job("J2", -2.5, d(2025, 3, 10), &cfg(8.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 1);
        assert!((segs[0].duration_hours - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_capacity_never_fails() {
        let segs = split_job("J1", 5.0, d(2025, 3, 10), &cfg(0.0), &[], &WorkingCalendar::default());
        assert_eq!(segs.len(), 1);
        assert!((segs[0].duration_hours - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_split_sum_equals_estimate() {
        // Fragmented calendar: odd commitments across several days
        let a = JobSegment::new("X-S1", "X", 7.5, d(2025, 3, 10));
        let b = JobSegment::new("X-S2", "X", 4.0, d(2025, 3, 11));
        let existing = [&a, &b];
        let segs = split_job("J1", 20.0, d(2025, 3, 10), &cfg(8.0), &existing, &WorkingCalendar::default());
        assert!((total_hours(&segs) - 20.0).abs() < 1e-9);
        // Dates strictly increase
        for pair in segs.windows(2) {
            assert!(pair[0].planned_date < pair[1].planned_date);
        }
    }

    #[test]
    fn test_sequential_ids() {
        let segs = split_job("J7", 20.0, d(2025, 3, 10), &cfg(8.0), &[], &WorkingCalendar::default());
        let ids: Vec<_> = segs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["J7-S1", "J7-S2", "J7-S3"]);
    }
}
