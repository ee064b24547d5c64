//! Job model.
//!
//! A job is a unit of work for one vehicle/customer at one business entity.
//! Its labor is carried entirely by its segments; the job's own status is
//! derived from segment statuses and never set directly (see `crate::status`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived overall status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// No segment has been placed yet.
    Unallocated,
    /// At least one segment placed, none started.
    Allocated,
    /// Work is underway (or partially complete) on at least one segment.
    InProgress,
    /// Every active segment is engineer-complete; QC outstanding on some.
    PendingQc,
    /// Every active segment has QC sign-off.
    Complete,
    /// No active segments remain.
    Cancelled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unallocated => "unallocated",
            Self::Allocated => "allocated",
            Self::InProgress => "in progress",
            Self::PendingQc => "pending QC",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A unit of estimated labor for one vehicle/customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Owning business entity.
    pub entity_id: String,
    /// Free-text description (vehicle, customer, work requested).
    pub description: String,
    /// Estimated total labor in hours.
    pub estimated_hours: f64,
    /// Derived status; recomputed after every segment change.
    pub status: JobStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Ordered segment ids belonging to this job.
    pub segment_ids: Vec<String>,
}

impl Job {
    /// Creates a new job with no segments.
    pub fn new(
        id: impl Into<String>,
        entity_id: impl Into<String>,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            entity_id: entity_id.into(),
            description: String::new(),
            estimated_hours,
            status: JobStatus::Unallocated,
            created_at: Utc::now(),
            segment_ids: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
