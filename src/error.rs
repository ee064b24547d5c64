//! Error types for scheduling operations.
//!
//! Collision and capacity errors are recoverable: callers pick another slot
//! or date (or accept the engine's suggestion via `find_next_free_slot` /
//! `find_next_available_date`). Invalid transitions are rejected without
//! side effects. Configuration errors are fatal at grid construction.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::SegmentStatus;

/// Errors produced by the scheduling core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Malformed slot grid parameters. Fatal at startup.
    #[error("invalid slot grid: {0}")]
    Configuration(String),

    /// The requested interval overlaps an active segment on the lift.
    #[error("slots {start_slot}..{end_slot} collide with an active segment on lift '{lift_id}' ({date})")]
    Collision {
        lift_id: String,
        date: NaiveDate,
        start_slot: usize,
        end_slot: usize,
    },

    /// The requested interval does not fit inside the day grid.
    #[error("slots {start_slot}..{end_slot} fall outside the day grid of {slot_count} slots")]
    SlotOutOfRange {
        start_slot: usize,
        end_slot: usize,
        slot_count: usize,
    },

    /// The engineer already has an overlapping segment that day.
    #[error("engineer '{engineer_id}' is already booked during slots {start_slot}..{end_slot} on {date}")]
    EngineerBooked {
        engineer_id: String,
        date: NaiveDate,
        start_slot: usize,
        end_slot: usize,
    },

    /// The day cannot absorb the requested hours.
    #[error("capacity exceeded on {date}: {committed:.1}h committed + {requested:.1}h requested > {effective:.1}h effective")]
    CapacityExceeded {
        date: NaiveDate,
        committed: f64,
        requested: f64,
        effective: f64,
    },

    /// The action is not permitted from the segment's current status.
    #[error("cannot {action} a segment in status {from}")]
    InvalidTransition { from: SegmentStatus, action: String },

    /// Quality sign-off attempted by a non-supervisory actor.
    #[error("quality sign-off requires a supervisor")]
    SupervisorRequired,

    /// Start/complete attempted by someone other than the assigned engineer.
    #[error("actor '{actor_id}' is not the engineer assigned to segment '{segment_id}'")]
    ActorNotAssigned { actor_id: String, segment_id: String },

    #[error("unknown segment '{0}'")]
    UnknownSegment(String),

    #[error("unknown job '{0}'")]
    UnknownJob(String),

    #[error("unknown lift '{0}'")]
    UnknownLift(String),

    #[error("unknown engineer '{0}'")]
    UnknownEngineer(String),
}

impl ScheduleError {
    /// Whether the caller can recover by choosing another slot or date.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Collision { .. }
                | Self::SlotOutOfRange { .. }
                | Self::EngineerBooked { .. }
                | Self::CapacityExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let collision = ScheduleError::Collision {
            lift_id: "L1".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_slot: 4,
            end_slot: 8,
        };
        assert!(collision.is_recoverable());

        let config = ScheduleError::Configuration("end before start".into());
        assert!(!config.is_recoverable());

        let transition = ScheduleError::InvalidTransition {
            from: SegmentStatus::Unallocated,
            action: "start".into(),
        };
        assert!(!transition.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = ScheduleError::CapacityExceeded {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            committed: 30.0,
            requested: 4.0,
            effective: 32.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("30.0h committed"));
        assert!(msg.contains("2025-03-10"));
    }
}
