//! Per-entity capacity configuration.

use serde::{Deserialize, Serialize};

/// Capacity configuration for one business entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Business entity identifier.
    pub entity_id: String,
    /// Ceiling of bookable labor hours per working day.
    pub daily_capacity_hours: f64,
    /// Committed/effective ratio at which a day is flagged high-load.
    pub high_load_ratio: f64,
}

impl EntityConfig {
    /// Creates a config with the default 0.8 high-load warning ratio.
    pub fn new(entity_id: impl Into<String>, daily_capacity_hours: f64) -> Self {
        Self {
            entity_id: entity_id.into(),
            daily_capacity_hours,
            high_load_ratio: 0.8,
        }
    }

    /// Sets the high-load warning ratio.
    pub fn with_high_load_ratio(mut self, ratio: f64) -> Self {
        self.high_load_ratio = ratio;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EntityConfig::new("E1", 40.0);
        assert_eq!(cfg.entity_id, "E1");
        assert!((cfg.daily_capacity_hours - 40.0).abs() < 1e-10);
        assert!((cfg.high_load_ratio - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_custom_ratio() {
        let cfg = EntityConfig::new("E1", 40.0).with_high_load_ratio(0.9);
        assert!((cfg.high_load_ratio - 0.9).abs() < 1e-10);
    }
}
