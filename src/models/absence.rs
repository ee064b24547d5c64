//! Absence requests.
//!
//! An absence request marks a date range during which one person is
//! unavailable. Pending and approved requests reduce the entity's
//! effective daily capacity; declined requests do not.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Approval state of an absence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceStatus {
    /// Awaiting a decision. Already reduces capacity.
    Pending,
    /// Approved; reduces capacity.
    Approved,
    /// Declined; has no capacity effect.
    Declined,
}

/// A date range during which one person is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// Unique request identifier.
    pub id: String,
    /// The absent person.
    pub engineer_id: String,
    /// First day of absence (inclusive).
    pub from: NaiveDate,
    /// Last day of absence (inclusive).
    pub to: NaiveDate,
    /// Approval state.
    pub status: AbsenceStatus,
}

impl AbsenceRequest {
    /// Creates a pending request covering `[from, to]`.
    pub fn new(
        id: impl Into<String>,
        engineer_id: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            engineer_id: engineer_id.into(),
            from,
            to,
            status: AbsenceStatus::Pending,
        }
    }

    /// Whether the request covers a date.
    #[inline]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Whether the request reduces capacity (pending or approved).
    #[inline]
    pub fn reduces_capacity(&self) -> bool {
        matches!(self.status, AbsenceStatus::Pending | AbsenceStatus::Approved)
    }

    /// Approves the request.
    pub fn approve(&mut self) {
        self.status = AbsenceStatus::Approved;
    }

    /// Declines the request.
    pub fn decline(&mut self) {
        self.status = AbsenceStatus::Declined;
    }
}
