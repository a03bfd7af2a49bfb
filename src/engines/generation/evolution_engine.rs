use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::TierDirectory;
use crate::config::EvolutionConfig;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::factory::ModuleFactory;
use crate::engines::generation::operators;
use crate::error::{GenforgeError, Result};
use crate::types::Module;

/// The working set one evolution pass operates on.
pub type Population = Vec<Module>;

/// Result of one evolution pass. Survivors come first in `modules`,
/// offspring after them.
#[derive(Debug)]
pub struct EvolvedGeneration {
    pub modules: Population,
    pub survivor_count: usize,
    /// Mutations that fired while breeding offspring.
    pub mutation_events: u64,
    /// Best pre-evolution fitness seen in the incoming population.
    pub best_fitness: f64,
}

/// Drives selection and breeding over module populations.
///
/// All randomness flows through one owned RNG, seeded from config when a
/// seed is set, so a seeded engine replays the same evolution decisions.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    factory: ModuleFactory,
    evaluator: FitnessEvaluator,
    tiers: Arc<TierDirectory>,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(
        config: EvolutionConfig,
        factory: ModuleFactory,
        evaluator: FitnessEvaluator,
        tiers: Arc<TierDirectory>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            factory,
            evaluator,
            tiers,
            rng,
        }
    }

    /// Synthesize a full starting population, one fresh module per slot with
    /// a uniformly random tier.
    pub fn seed_population(&mut self) -> Population {
        (0..self.config.generation_size)
            .map(|_| {
                let tier = self.tiers.random_ordinal(&mut self.rng);
                self.factory.generate(tier, None, &mut self.rng).module
            })
            .collect()
    }

    /// Run one selection-and-breeding pass.
    ///
    /// The population is scored and ranked, the configured fraction survives
    /// (fractional counts truncate), and offspring bred from random survivor
    /// pairs fill the generation back to its configured size. Ties keep
    /// their incoming order. Fails with [`GenforgeError::NoSurvivors`] when
    /// selection leaves nothing to breed from.
    pub fn evolve(&mut self, population: Population) -> Result<EvolvedGeneration> {
        let target = self.config.generation_size;

        let mut ranked: Vec<(Module, f64)> = population
            .into_iter()
            .map(|module| {
                let fitness = self.evaluator.score(&module);
                (module, fitness)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let best_fitness = ranked.first().map(|(_, fitness)| *fitness).unwrap_or(0.0);
        let survivor_count =
            ((target as f64 * self.config.selection_pressure) as usize).min(ranked.len());

        let mut next: Population = ranked
            .into_iter()
            .take(survivor_count)
            .map(|(module, _)| module)
            .collect();

        if next.is_empty() {
            return Err(GenforgeError::NoSurvivors);
        }

        let mut mutation_events = 0u64;
        while next.len() < target {
            let first = self.rng.gen_range(0..survivor_count);
            let second = self.rng.gen_range(0..survivor_count);
            let child_genes = operators::crossover(
                &next[first].genes,
                &next[second].genes,
                self.config.crossover_rate,
                &mut self.rng,
            );
            let tier = if self.rng.gen_bool(0.5) {
                next[first].tier
            } else {
                next[second].tier
            };
            let spawn = self.factory.generate(tier, Some(&child_genes), &mut self.rng);
            mutation_events += u64::from(spawn.mutations);
            next.push(spawn.module);
        }

        debug!(
            "evolved generation: {} survivors, {} offspring, best fitness {:.4}",
            survivor_count,
            next.len() - survivor_count,
            best_fitness
        );

        Ok(EvolvedGeneration {
            survivor_count,
            mutation_events,
            best_fitness,
            modules: next,
        })
    }
}
