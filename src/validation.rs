//! Structural integrity checks over a loaded board.
//!
//! Validates the invariants the dispatch operations rely on, for data
//! arriving from the persistence layer. Detects:
//! - Duplicate lift/engineer IDs
//! - Dangling job, lift, or engineer references
//! - Placement-invariant violations (partially placed segments)
//! - Intervals outside the day grid
//! - Slot overlaps between active segments on the same lift and date

use std::collections::{HashMap, HashSet};

use crate::grid::SlotGrid;
use crate::models::{Engineer, JobSegment, Lift, SegmentStatus};
use crate::store::ScheduleStore;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A segment references a job that doesn't exist.
    UnknownJobReference,
    /// A job lists a segment id that doesn't exist.
    UnknownSegmentReference,
    /// A placed segment references a lift that doesn't exist.
    UnknownLiftReference,
    /// A placed segment references an engineer that doesn't exist.
    UnknownEngineerReference,
    /// Placement fields inconsistent with the segment's status.
    PlacementIncomplete,
    /// A placed interval runs past the day grid.
    OutOfGrid,
    /// Two active segments overlap on the same lift and date.
    SlotOverlap,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a board's structural integrity.
///
/// Checks:
/// 1. No duplicate lift or engineer IDs
/// 2. Every segment's job exists; every job's segment ids exist
/// 3. Placed segments reference known lifts and engineers
/// 4. The placement invariant holds in both directions
/// 5. Placed intervals fit inside the grid
/// 6. No two active segments overlap on a lift/date
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_board(
    store: &ScheduleStore,
    lifts: &[Lift],
    engineers: &[Engineer],
    grid: &SlotGrid,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut lift_ids = HashSet::new();
    for lift in lifts {
        if !lift_ids.insert(lift.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lift ID: {}", lift.id),
            ));
        }
    }

    let mut engineer_ids = HashSet::new();
    for engineer in engineers {
        if !engineer_ids.insert(engineer.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate engineer ID: {}", engineer.id),
            ));
        }
    }

    for job in store.jobs() {
        for segment_id in &job.segment_ids {
            if store.segment(segment_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSegmentReference,
                    format!("Job '{}' lists unknown segment '{segment_id}'", job.id),
                ));
            }
        }
    }

    for segment in store.segments() {
        if store.job(&segment.job_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownJobReference,
                format!("Segment '{}' references unknown job '{}'", segment.id, segment.job_id),
            ));
        }

        check_placement(segment, &lift_ids, &engineer_ids, grid, &mut errors);
    }

    detect_overlaps(store, grid, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_placement(
    segment: &JobSegment,
    lift_ids: &HashSet<&str>,
    engineer_ids: &HashSet<&str>,
    grid: &SlotGrid,
    errors: &mut Vec<ValidationError>,
) {
    let has_any = segment.date.is_some()
        || segment.lift_id.is_some()
        || segment.engineer_id.is_some()
        || segment.start_slot.is_some();

    match segment.status {
        SegmentStatus::Unallocated => {
            if has_any {
                errors.push(ValidationError::new(
                    ValidationErrorKind::PlacementIncomplete,
                    format!("Unallocated segment '{}' retains placement fields", segment.id),
                ));
            }
            return;
        }
        // Cancelled segments may keep or lack their last placement
        SegmentStatus::Cancelled => return,
        _ => {}
    }

    if !segment.is_placed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::PlacementIncomplete,
            format!(
                "Segment '{}' has status {} but incomplete placement",
                segment.id, segment.status
            ),
        ));
        return;
    }

    if let Some(lift_id) = segment.lift_id.as_deref() {
        if !lift_ids.contains(lift_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLiftReference,
                format!("Segment '{}' references unknown lift '{lift_id}'", segment.id),
            ));
        }
    }
    if let Some(engineer_id) = segment.engineer_id.as_deref() {
        if !engineer_ids.contains(engineer_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEngineerReference,
                format!(
                    "Segment '{}' references unknown engineer '{engineer_id}'",
                    segment.id
                ),
            ));
        }
    }

    if let Some((start, end)) = segment.slot_interval(grid) {
        if end > grid.slot_count() {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfGrid,
                format!(
                    "Segment '{}' occupies slots {start}..{end} beyond the {}-slot grid",
                    segment.id,
                    grid.slot_count()
                ),
            ));
        }
    }
}

/// Pairwise interval check per (lift, date) over active placed segments.
fn detect_overlaps(store: &ScheduleStore, grid: &SlotGrid, errors: &mut Vec<ValidationError>) {
    let mut by_lift_date: HashMap<(&str, chrono::NaiveDate), Vec<&JobSegment>> = HashMap::new();
    for segment in store.segments() {
        if !segment.is_active() {
            continue;
        }
        if let (Some(lift_id), Some(date)) = (segment.lift_id.as_deref(), segment.date) {
            by_lift_date.entry((lift_id, date)).or_default().push(segment);
        }
    }

    for ((lift_id, date), mut segments) in by_lift_date {
        segments.sort_by_key(|s| s.start_slot);
        for pair in segments.windows(2) {
            let (Some((a_start, a_end)), Some((b_start, b_end))) =
                (pair[0].slot_interval(grid), pair[1].slot_interval(grid))
            else {
                continue;
            };
            if a_start < b_end && b_start < a_end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SlotOverlap,
                    format!(
                        "Segments '{}' and '{}' overlap on lift '{lift_id}' ({date})",
                        pair[0].id, pair[1].id
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use chrono::{NaiveDate, NaiveTime};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn grid() -> SlotGrid {
        SlotGrid::new(
            NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            30,
        )
        .unwrap()
    }

    fn placed_segment(id: &str, job_id: &str, start_slot: usize, hours: f64) -> JobSegment {
        let mut seg = JobSegment::new(id, job_id, hours, d(2025, 3, 10));
        seg.date = Some(d(2025, 3, 10));
        seg.lift_id = Some("L1".into());
        seg.engineer_id = Some("W1".into());
        seg.start_slot = Some(start_slot);
        seg.status = SegmentStatus::Allocated;
        seg
    }

    fn sample_store() -> ScheduleStore {
        let mut store = ScheduleStore::new();
        store.insert_job(Job::new("J1", "E1", 4.0));
        store.insert_segment(placed_segment("J1-S1", "J1", 0, 2.0));
        store.insert_segment(placed_segment("J1-S2", "J1", 4, 2.0));
        store
    }

    fn directories() -> (Vec<Lift>, Vec<Engineer>) {
        (
            vec![Lift::new("L1", "E1")],
            vec![Engineer::new("W1", "E1")],
        )
    }

    #[test]
    fn test_valid_board() {
        let (lifts, engineers) = directories();
        assert!(validate_board(&sample_store(), &lifts, &engineers, &grid()).is_ok());
    }

    #[test]
    fn test_duplicate_lift_id() {
        let lifts = vec![Lift::new("L1", "E1"), Lift::new("L1", "E1")];
        let engineers = vec![Engineer::new("W1", "E1")];
        let errors = validate_board(&sample_store(), &lifts, &engineers, &grid()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("lift")));
    }

    #[test]
    fn test_unknown_job_reference() {
        let mut store = sample_store();
        store.insert_segment(placed_segment("X-S1", "NONEXISTENT", 8, 1.0));
        let (lifts, engineers) = directories();
        let errors = validate_board(&store, &lifts, &engineers, &grid()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownJobReference));
    }

    #[test]
    fn test_unknown_lift_reference() {
        let mut store = sample_store();
        let mut seg = placed_segment("J1-S3", "J1", 8, 1.0);
        seg.lift_id = Some("L9".into());
        store.insert_segment(seg);
        let (lifts, engineers) = directories();
        let errors = validate_board(&store, &lifts, &engineers, &grid()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownLiftReference));
    }

    #[test]
    fn test_placement_invariant_both_directions() {
        let mut store = sample_store();
        // Placed status but no engineer
        let mut partial = placed_segment("J1-S3", "J1", 8, 1.0);
        partial.engineer_id = None;
        store.insert_segment(partial);
        // Unallocated but still holding a slot
        let mut stale = JobSegment::new("J1-S4", "J1", 1.0, d(2025, 3, 10));
        stale.start_slot = Some(12);
        store.insert_segment(stale);

        let (lifts, engineers) = directories();
        let errors = validate_board(&store, &lifts, &engineers, &grid()).unwrap_err();
        let placement_errors = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::PlacementIncomplete)
            .count();
        assert_eq!(placement_errors, 2);
    }

    #[test]
    fn test_out_of_grid_interval() {
        let mut store = sample_store();
        // 2h at slot 17 runs to slot 21 on an 18-slot grid
        store.insert_segment(placed_segment("J1-S3", "J1", 17, 2.0));
        let (lifts, engineers) = directories();
        let errors = validate_board(&store, &lifts, &engineers, &grid()).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::OutOfGrid));
    }

    #[test]
    fn test_overlap_detected() {
        let mut store = sample_store();
        // [3,7) overlaps J1-S2's [4,8)
        store.insert_segment(placed_segment("J1-S3", "J1", 3, 2.0));
        let (lifts, engineers) = directories();
        let errors = validate_board(&store, &lifts, &engineers, &grid()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SlotOverlap));
    }

    #[test]
    fn test_cancelled_overlap_ignored() {
        let mut store = sample_store();
        let mut gone = placed_segment("J1-S3", "J1", 3, 2.0);
        gone.status = SegmentStatus::Cancelled;
        store.insert_segment(gone);
        let (lifts, engineers) = directories();
        assert!(validate_board(&store, &lifts, &engineers, &grid()).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut store = sample_store();
        store.insert_segment(placed_segment("X-S1", "NONEXISTENT", 3, 2.0));
        let lifts = vec![Lift::new("L1", "E1"), Lift::new("L1", "E1")];
        let engineers = vec![Engineer::new("W1", "E1")];
        let errors = validate_board(&store, &lifts, &engineers, &grid()).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
