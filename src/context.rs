//! Scheduling context for dispatch operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The actor's role, used to gate supervisory actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    /// Workshop engineer; may act on segments assigned to them.
    Engineer,
    /// Supervisory role; may act on any segment and sign off QC.
    Supervisor,
}

/// Explicit per-call context: which entity is being scheduled, who is
/// acting, and what "today" is.
///
/// Passed into every dispatch operation instead of reading ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingContext {
    /// Business entity the operation targets.
    pub entity_id: String,
    /// Acting user (engineer or supervisor id).
    pub actor_id: String,
    /// Acting user's role.
    pub role: ActorRole,
    /// Current date as seen by the caller.
    pub today: NaiveDate,
}

impl SchedulingContext {
    /// Creates a context.
    pub fn new(
        entity_id: impl Into<String>,
        actor_id: impl Into<String>,
        role: ActorRole,
        today: NaiveDate,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            actor_id: actor_id.into(),
            role,
            today,
        }
    }

    /// Whether the actor holds a supervisory role.
    #[inline]
    pub fn is_supervisor(&self) -> bool {
        self.role == ActorRole::Supervisor
    }
}
