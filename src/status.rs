//! Job status derivation.
//!
//! A job's overall status is a pure function of its segments' statuses,
//! evaluated over the active (non-cancelled) set with a fixed precedence.
//! Partially-completed multi-segment jobs resolve to `InProgress`: dispatch
//! attention is still required even if nothing is on a lift right now.
//!
//! This is the only place job status is computed; mutation sites call it
//! after every segment change instead of reasoning about status inline.

use crate::models::{JobSegment, JobStatus, SegmentStatus};

/// Derives the job status from its segments.
///
/// Precedence, over active segments only:
/// 1. none active → `Cancelled`
/// 2. any in progress or paused → `InProgress`
/// 3. all QC complete → `Complete`
/// 4. all engineer- or QC-complete → `PendingQc`
/// 5. any engineer- or QC-complete (but not all) → `InProgress`
/// 6. any allocated → `Allocated`
/// 7. otherwise → `Unallocated`
pub fn derive_job_status<'a, I>(segments: I) -> JobStatus
where
    I: IntoIterator<Item = &'a JobSegment>,
{
    let active: Vec<SegmentStatus> = segments
        .into_iter()
        .filter(|s| s.is_active())
        .map(|s| s.status)
        .collect();

    if active.is_empty() {
        return JobStatus::Cancelled;
    }

    if active
        .iter()
        .any(|s| matches!(s, SegmentStatus::InProgress | SegmentStatus::Paused))
    {
        return JobStatus::InProgress;
    }

    let complete = |s: &SegmentStatus| {
        matches!(s, SegmentStatus::EngineerComplete | SegmentStatus::QcComplete)
    };

    if active.iter().all(|s| *s == SegmentStatus::QcComplete) {
        return JobStatus::Complete;
    }
    if active.iter().all(complete) {
        return JobStatus::PendingQc;
    }
    if active.iter().any(complete) {
        return JobStatus::InProgress;
    }
    if active.iter().any(|s| *s == SegmentStatus::Allocated) {
        return JobStatus::Allocated;
    }

    JobStatus::Unallocated
}
