use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Gene;

/// Lifecycle label carried by every module.
///
/// Strings not in this list deserialize as [`ModuleStatus::Unknown`], so a
/// hand-edited module file never breaks a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    Active,
    Synced,
    Optimized,
    InTest,
    Deprecated,
    #[serde(other)]
    Unknown,
}

impl ModuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Active => "active",
            ModuleStatus::Synced => "synced",
            ModuleStatus::Optimized => "optimized",
            ModuleStatus::InTest => "in-test",
            ModuleStatus::Deprecated => "deprecated",
            ModuleStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated module: the unit the evolution loop breeds, scores and
/// persists. Identity fields never change after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique id, `<unix-seconds>-<8 hex chars>`.
    pub id: String,
    /// Human-readable name derived from the tier and gene count.
    pub name: String,
    /// Tier ordinal, 1 through 8.
    pub tier: u8,
    /// Tags copied out of the gene pool. May hold duplicates after crossover.
    pub genes: Vec<Gene>,
    pub status: ModuleStatus,
    pub created_at: DateTime<Utc>,
    /// First 16 hex chars of the SHA3-256 digest of `id`.
    pub content_hash: String,
}

/// Cross-run progress counters. Loaded at startup, flushed after every
/// cycle, and only ever written by the cycle loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    pub modules_generated: u64,
    pub genes_mutated: u64,
    pub cycles_completed: u64,
    pub last_run: Option<DateTime<Utc>>,
    pub progress_pct: f64,
}

/// Slice of a retained module embedded in a cycle report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModule {
    pub id: String,
    pub name: String,
    pub tier: u8,
    pub status: ModuleStatus,
    pub fitness: f64,
    pub genes: Vec<Gene>,
}

impl ReportModule {
    pub fn new(module: &Module, fitness: f64) -> Self {
        Self {
            id: module.id.clone(),
            name: module.name.clone(),
            tier: module.tier,
            status: module.status,
            fitness,
            genes: module.genes.clone(),
        }
    }
}

/// Snapshot written at the end of each cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub generated_at: DateTime<Utc>,
    pub cycle: u64,
    pub retained: usize,
    pub best_fitness: f64,
    pub top_modules: Vec<ReportModule>,
    pub counters: Counters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_absorbs_unrecognized_labels() {
        let status: ModuleStatus = serde_json::from_str("\"quarantined\"").unwrap();
        assert_eq!(status, ModuleStatus::Unknown);
    }

    #[test]
    fn status_labels_round_trip() {
        for status in [
            ModuleStatus::Active,
            ModuleStatus::Synced,
            ModuleStatus::Optimized,
            ModuleStatus::InTest,
            ModuleStatus::Deprecated,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            let back: ModuleStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn default_counters_start_at_zero() {
        let counters = Counters::default();
        assert_eq!(counters.modules_generated, 0);
        assert_eq!(counters.cycles_completed, 0);
        assert!(counters.last_run.is_none());
    }
}
