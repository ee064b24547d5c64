//! Segment status state machine.
//!
//! All transitions are externally triggered workshop actions, never
//! time-based. Invalid actions are rejected and leave the segment
//! untouched.
//!
//! ```text
//! Unallocated → Allocated → InProgress ⇄ Paused
//!                               │
//!                               ▼
//!                       EngineerComplete → QcComplete (terminal)
//!
//! any non-terminal → Unallocated (placement cleared)
//! any state        → Cancelled   (terminal)
//! ```

use chrono::Utc;
use tracing::info;

use crate::context::SchedulingContext;
use crate::error::ScheduleError;
use crate::models::{JobSegment, SegmentStatus};

/// A workshop action against one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentAction {
    /// Begin work on an allocated segment.
    Start,
    /// Interrupt work; the reason is audited.
    Pause { reason: String },
    /// Resume paused work.
    Resume,
    /// Assigned engineer declares the work finished.
    CompleteWork,
    /// Supervisor records quality sign-off.
    SignOffQc,
    /// Return the segment to the unallocated pool.
    Unschedule,
    /// Cancel the segment outright.
    Cancel,
}

impl SegmentAction {
    /// Verb used in audit messages and errors.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause { .. } => "pause",
            Self::Resume => "resume",
            Self::CompleteWork => "complete",
            Self::SignOffQc => "sign off QC on",
            Self::Unschedule => "unschedule",
            Self::Cancel => "cancel",
        }
    }
}

/// Applies an action to a segment, enforcing the transition table and the
/// actor rules (start/complete by the assigned engineer or a supervisor;
/// QC sign-off by a supervisor only).
///
/// On rejection the segment is left exactly as it was.
pub fn apply(
    segment: &mut JobSegment,
    action: &SegmentAction,
    ctx: &SchedulingContext,
) -> Result<(), ScheduleError> {
    let from = segment.status;
    let invalid = || ScheduleError::InvalidTransition {
        from,
        action: action.verb().to_string(),
    };

    match action {
        SegmentAction::Start => {
            if from != SegmentStatus::Allocated {
                return Err(invalid());
            }
            require_assigned(segment, ctx)?;
            segment.status = SegmentStatus::InProgress;
        }
        SegmentAction::Pause { reason } => {
            if from != SegmentStatus::InProgress {
                return Err(invalid());
            }
            segment.status = SegmentStatus::Paused;
            info!(segment = %segment.id, actor = %ctx.actor_id, %reason, "segment paused");
        }
        SegmentAction::Resume => {
            if from != SegmentStatus::Paused {
                return Err(invalid());
            }
            segment.status = SegmentStatus::InProgress;
        }
        SegmentAction::CompleteWork => {
            if from != SegmentStatus::InProgress {
                return Err(invalid());
            }
            require_assigned(segment, ctx)?;
            segment.status = SegmentStatus::EngineerComplete;
        }
        SegmentAction::SignOffQc => {
            if from != SegmentStatus::EngineerComplete {
                return Err(invalid());
            }
            if !ctx.is_supervisor() {
                return Err(ScheduleError::SupervisorRequired);
            }
            segment.status = SegmentStatus::QcComplete;
            segment.qc_signed_off_by = Some(ctx.actor_id.clone());
            segment.qc_signed_off_at = Some(Utc::now());
            info!(segment = %segment.id, actor = %ctx.actor_id, "QC signed off");
        }
        SegmentAction::Unschedule => {
            if from.is_terminal() {
                return Err(invalid());
            }
            segment.status = SegmentStatus::Unallocated;
            segment.clear_placement();
            info!(segment = %segment.id, actor = %ctx.actor_id, "segment returned to pool");
        }
        SegmentAction::Cancel => {
            if from == SegmentStatus::Cancelled {
                return Err(invalid());
            }
            segment.status = SegmentStatus::Cancelled;
            info!(segment = %segment.id, actor = %ctx.actor_id, "segment cancelled");
        }
    }
    Ok(())
}

/// Start/complete must come from the assigned engineer; supervisors may act
/// on any segment.
fn require_assigned(segment: &JobSegment, ctx: &SchedulingContext) -> Result<(), ScheduleError> {
    if ctx.is_supervisor() {
        return Ok(());
    }
    match &segment.engineer_id {
        Some(assigned) if *assigned == ctx.actor_id => Ok(()),
        _ => Err(ScheduleError::ActorNotAssigned {
            actor_id: ctx.actor_id.clone(),
            segment_id: segment.id.clone(),
        }),
    }
}
