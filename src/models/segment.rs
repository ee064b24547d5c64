//! Job segment model.
//!
//! A segment is one contiguous, resource-and-time-bound slice of a job's
//! labor. Segments are created by the splitter, placed by the allocation
//! engine, and advanced through their lifecycle by the state machine.
//! They are never deleted, only cancelled or returned to the pool.
//!
//! # Placement Invariant
//! A placed segment (status other than `Unallocated`/`Cancelled`) has all
//! four placement fields set; an `Unallocated` segment has all four null.
//! The planned date assigned at split time is a separate field used for
//! capacity planning and survives unscheduling.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::SlotGrid;

/// Lifecycle status of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentStatus {
    /// In the pool; no lift, date, slot, or engineer.
    Unallocated,
    /// Placed on a lift/date/slot with an engineer, not yet started.
    Allocated,
    /// Actively being worked.
    InProgress,
    /// Work interrupted; reason is audited by the caller.
    Paused,
    /// Assigned engineer finished; awaiting quality sign-off.
    EngineerComplete,
    /// Quality sign-off recorded. Terminal.
    QcComplete,
    /// Explicitly cancelled. Terminal.
    Cancelled,
}

impl SegmentStatus {
    /// Whether no further lifecycle actions apply.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::QcComplete | Self::Cancelled)
    }
}

impl std::fmt::Display for SegmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unallocated => "unallocated",
            Self::Allocated => "allocated",
            Self::InProgress => "in progress",
            Self::Paused => "paused",
            Self::EngineerComplete => "engineer complete",
            Self::QcComplete => "QC complete",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One placed or placeable slice of a job's labor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSegment {
    /// Unique segment identifier.
    pub id: String,
    /// Owning job.
    pub job_id: String,
    /// Labor duration in hours (a multiple of the grid's slot granularity).
    pub duration_hours: f64,
    /// Calendar date assigned by the splitter for capacity planning.
    pub planned_date: NaiveDate,
    /// Scheduled date. Set by the allocation engine.
    pub date: Option<NaiveDate>,
    /// Service bay the segment occupies.
    pub lift_id: Option<String>,
    /// Engineer assigned to the work.
    pub engineer_id: Option<String>,
    /// First occupied slot index on the grid.
    pub start_slot: Option<usize>,
    /// Current lifecycle status.
    pub status: SegmentStatus,
    /// Quality sign-off actor, once recorded.
    pub qc_signed_off_by: Option<String>,
    /// Quality sign-off timestamp, once recorded.
    pub qc_signed_off_at: Option<DateTime<Utc>>,
}

impl JobSegment {
    /// Creates an unallocated segment planned for the given date.
    pub fn new(
        id: impl Into<String>,
        job_id: impl Into<String>,
        duration_hours: f64,
        planned_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            job_id: job_id.into(),
            duration_hours,
            planned_date,
            date: None,
            lift_id: None,
            engineer_id: None,
            start_slot: None,
            status: SegmentStatus::Unallocated,
            qc_signed_off_by: None,
            qc_signed_off_at: None,
        }
    }

    /// Whether this segment still counts toward the job (not cancelled).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status != SegmentStatus::Cancelled
    }

    /// Whether all placement fields are set.
    pub fn is_placed(&self) -> bool {
        self.date.is_some()
            && self.lift_id.is_some()
            && self.engineer_id.is_some()
            && self.start_slot.is_some()
    }

    /// The date this segment's hours count against: the scheduled date if
    /// placed, otherwise the planned date.
    #[inline]
    pub fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or(self.planned_date)
    }

    /// Number of grid slots this segment covers.
    pub fn slot_span(&self, grid: &SlotGrid) -> usize {
        grid.duration_to_slot_span(self.duration_hours)
    }

    /// The half-open `[start, end)` slot interval, if placed.
    pub fn slot_interval(&self, grid: &SlotGrid) -> Option<(usize, usize)> {
        self.start_slot.map(|s| (s, s + self.slot_span(grid)))
    }

    /// Captures the current placement for later restore.
    pub fn snapshot(&self) -> PlacementSnapshot {
        PlacementSnapshot {
            date: self.date,
            lift_id: self.lift_id.clone(),
            engineer_id: self.engineer_id.clone(),
            start_slot: self.start_slot,
            status: self.status,
        }
    }

    /// Restores a previously captured placement.
    pub fn restore(&mut self, snapshot: PlacementSnapshot) {
        self.date = snapshot.date;
        self.lift_id = snapshot.lift_id;
        self.engineer_id = snapshot.engineer_id;
        self.start_slot = snapshot.start_slot;
        self.status = snapshot.status;
    }

    /// Clears all placement fields (returns the segment to the pool).
    pub fn clear_placement(&mut self) {
        self.date = None;
        self.lift_id = None;
        self.engineer_id = None;
        self.start_slot = None;
    }
}

/// A segment's placement fields and status at a point in time.
///
/// Used by `move` to restore the original placement when the new one fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSnapshot {
    pub date: Option<NaiveDate>,
    pub lift_id: Option<String>,
    pub engineer_id: Option<String>,
    pub start_slot: Option<usize>,
    pub status: SegmentStatus,
}
