use serde::{Deserialize, Serialize};

use crate::error::{GenforgeError, Result};

/// Knobs for one evolution pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Modules per generation, before and after evolving.
    pub generation_size: usize,
    /// Fraction of the generation that survives selection.
    pub selection_pressure: f64,
    /// Chance that an offspring's gene list takes a mutation.
    pub mutation_rate: f64,
    /// Chance that an offspring is bred by crossover rather than copied.
    pub crossover_rate: f64,
    /// Fixed RNG seed for reproducible runs. Entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generation_size: 50,
            selection_pressure: 0.85,
            mutation_rate: 0.15,
            crossover_rate: 0.70,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.generation_size == 0 {
            return Err(GenforgeError::Configuration(
                "generation_size must be greater than 0".to_string(),
            ));
        }
        if self.selection_pressure <= 0.0 || self.selection_pressure > 1.0 {
            return Err(GenforgeError::Configuration(
                "selection_pressure must be within (0, 1]".to_string(),
            ));
        }
        if (self.generation_size as f64 * self.selection_pressure) as usize == 0 {
            return Err(GenforgeError::Configuration(
                "selection_pressure leaves no survivors at this generation_size".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GenforgeError::Configuration(
                "mutation_rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GenforgeError::Configuration(
                "crossover_rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_generation_size_is_rejected() {
        let config = EvolutionConfig {
            generation_size: 0,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pressure_that_starves_the_generation_is_rejected() {
        let config = EvolutionConfig {
            generation_size: 2,
            selection_pressure: 0.25,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_rates_are_rejected() {
        let mutation = EvolutionConfig {
            mutation_rate: 1.5,
            ..EvolutionConfig::default()
        };
        assert!(mutation.validate().is_err());
        let crossover = EvolutionConfig {
            crossover_rate: -0.1,
            ..EvolutionConfig::default()
        };
        assert!(crossover.validate().is_err());
    }
}
