use serde::{Deserialize, Serialize};

use crate::error::{GenforgeError, Result};

/// Pacing and retention rules for the continuous loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Pause between cycles.
    pub interval_secs: u64,
    /// Minimum fitness a module needs to be persisted.
    pub fitness_threshold: f64,
    /// Cap on modules persisted per cycle.
    pub max_retained: usize,
    /// Module count the progress percentage is measured against.
    pub target_total: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            fitness_threshold: 0.80,
            max_retained: 10,
            target_total: 2500,
        }
    }
}

impl CycleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(GenforgeError::Configuration(
                "interval_secs must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fitness_threshold) {
            return Err(GenforgeError::Configuration(
                "fitness_threshold must be between 0 and 1".to_string(),
            ));
        }
        if self.max_retained == 0 {
            return Err(GenforgeError::Configuration(
                "max_retained must be greater than 0".to_string(),
            ));
        }
        if self.target_total == 0 {
            return Err(GenforgeError::Configuration(
                "target_total must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
