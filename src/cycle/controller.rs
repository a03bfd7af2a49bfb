use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{info, warn};
use tokio::sync::watch;

use crate::catalog::{GenePool, TierDirectory};
use crate::config::{CycleConfig, EvolutionConfig};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{EvolutionEngine, ModuleFactory};
use crate::error::Result;
use crate::remote::RemoteSync;
use crate::storage::{ModuleArchive, StateStore};
use crate::types::{Counters, CycleReport, Module, ReportModule};

/// How many retained modules a report lists at most.
const REPORT_TOP_N: usize = 5;

/// What one cycle did, for logging and tests.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub cycle: u64,
    pub retained: usize,
    pub best_fitness: f64,
    pub mutation_events: u64,
}

/// Runs the seed, evolve, retain, persist sequence and owns the counters.
///
/// The controller is the only writer of the counters for its store; the
/// status endpoint and tests read them through the store.
pub struct CycleController<S> {
    engine: EvolutionEngine,
    evaluator: FitnessEvaluator,
    config: CycleConfig,
    store: Arc<S>,
    remote: RemoteSync,
    counters: Counters,
}

impl<S: StateStore + ModuleArchive> CycleController<S> {
    pub fn new(
        evolution: EvolutionConfig,
        config: CycleConfig,
        store: Arc<S>,
        remote: RemoteSync,
    ) -> Result<Self> {
        let pool = Arc::new(GenePool::standard());
        let tiers = Arc::new(TierDirectory::standard());
        let factory = ModuleFactory::new(Arc::clone(&pool), Arc::clone(&tiers), evolution.mutation_rate);
        let evaluator = FitnessEvaluator::new();
        let engine = EvolutionEngine::new(evolution, factory, evaluator, Arc::clone(&tiers));
        let counters = store.load_counters()?;
        Ok(Self {
            engine,
            evaluator,
            config,
            store,
            remote,
            counters,
        })
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// One full cycle: seed a population, evolve it, rescore, persist the
    /// qualifying top slice, flush counters, then report.
    ///
    /// A counter flush failure aborts the cycle with an error; mirror, audit
    /// and report failures only degrade it.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let population = self.engine.seed_population();
        let generation = self.engine.evolve(population)?;
        let mutation_events = generation.mutation_events;

        let mut rescored: Vec<(Module, f64)> = generation
            .modules
            .into_iter()
            .map(|module| {
                let fitness = self.evaluator.score(&module);
                (module, fitness)
            })
            .collect();
        rescored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let best_fitness = rescored.first().map(|(_, fitness)| *fitness).unwrap_or(0.0);

        let retained: Vec<(Module, f64)> = rescored
            .into_iter()
            .filter(|(_, fitness)| *fitness >= self.config.fitness_threshold)
            .take(self.config.max_retained)
            .collect();

        for (module, _) in &retained {
            match self.store.persist_module(module) {
                Ok(_) => {
                    if let Err(err) = self.store.append_audit(module) {
                        warn!("audit append failed for {}: {err}", module.id);
                    }
                }
                Err(err) => warn!("failed to persist module {}: {err}", module.id),
            }
        }

        let now = Utc::now();
        self.counters.modules_generated += retained.len() as u64;
        self.counters.genes_mutated += mutation_events;
        self.counters.cycles_completed += 1;
        self.counters.last_run = Some(now);
        self.counters.progress_pct =
            self.counters.modules_generated as f64 / self.config.target_total as f64 * 100.0;

        // Losing the counters desynchronizes every later cycle, so this one
        // failure is not survivable.
        self.store.save_counters(&self.counters)?;

        let report = CycleReport {
            generated_at: now,
            cycle: self.counters.cycles_completed,
            retained: retained.len(),
            best_fitness,
            top_modules: retained
                .iter()
                .take(REPORT_TOP_N)
                .map(|(module, fitness)| ReportModule::new(module, *fitness))
                .collect(),
            counters: self.counters.clone(),
        };
        match self.store.write_report(&report) {
            Ok(path) => self.remote.push_report(&report, &path),
            Err(err) => warn!("report write failed: {err}"),
        }

        Ok(CycleOutcome {
            cycle: self.counters.cycles_completed,
            retained: retained.len(),
            best_fitness,
            mutation_events,
        })
    }

    /// Run cycles until `max_cycles` is hit or shutdown flips. The shutdown
    /// check sits at the iteration boundary, so an in-flight cycle always
    /// finishes and the counters stay consistent.
    pub async fn run(
        &mut self,
        max_cycles: Option<u64>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        let interval = Duration::from_secs(self.config.interval_secs);
        let mut completed = 0u64;
        loop {
            let outcome = self.run_cycle()?;
            info!(
                "cycle {} done: retained {}, best fitness {:.4}, {} modules generated so far",
                outcome.cycle, outcome.retained, outcome.best_fitness, self.counters.modules_generated
            );

            completed += 1;
            if let Some(max) = max_cycles {
                if completed >= max {
                    info!("reached the configured {max} cycle(s), stopping");
                    break;
                }
            }
            if *shutdown.borrow() {
                info!("shutdown requested, stopping the cycle loop");
                break;
            }
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("shutdown requested, stopping the cycle loop");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
        Ok(())
    }
}
