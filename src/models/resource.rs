//! Schedulable resources: lifts and engineers.
//!
//! A lift (service bay) is a physical station that holds at most one active
//! segment per slot per date. An engineer is assigned to a segment, not to
//! a lift, and cannot work two overlapping segments on the same day.

use serde::{Deserialize, Serialize};

/// A service bay belonging to one business entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lift {
    /// Unique lift identifier.
    pub id: String,
    /// Display name, e.g. "Bay 2".
    pub name: String,
    /// Owning business entity.
    pub entity_id: String,
}

impl Lift {
    /// Creates a new lift.
    pub fn new(id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            entity_id: entity_id.into(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A worker belonging to one business entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engineer {
    /// Unique engineer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning business entity.
    pub entity_id: String,
    /// Specialization tag, e.g. "diagnostics", "bodywork".
    pub specialization: String,
}

impl Engineer {
    /// Creates a new engineer.
    pub fn new(id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            entity_id: entity_id.into(),
            specialization: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the specialization tag.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }
}
