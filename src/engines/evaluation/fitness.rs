use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::catalog::TIER_COUNT;
use crate::types::{Module, ModuleStatus};

const WEIGHT_DIVERSITY: f64 = 0.30;
const WEIGHT_TIER: f64 = 0.30;
const WEIGHT_FRESHNESS: f64 = 0.20;
const WEIGHT_STATUS: f64 = 0.20;

/// Age at which the freshness term bottoms out, one week.
const FRESHNESS_WINDOW_HOURS: f64 = 168.0;

/// Scores modules on a fixed 0..=1 scale.
///
/// The score is a weighted sum of four terms: gene diversity, tier height,
/// freshness and lifecycle status. Weights sum to 1 and every term is
/// clamped, so any module, including one with no genes at all, lands inside
/// the scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessEvaluator;

impl FitnessEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Score against the current wall clock.
    pub fn score(&self, module: &Module) -> f64 {
        self.score_at(module, Utc::now())
    }

    /// Score with an explicit reference time for the freshness term.
    pub fn score_at(&self, module: &Module, now: DateTime<Utc>) -> f64 {
        let total = WEIGHT_DIVERSITY * gene_diversity(module)
            + WEIGHT_TIER * tier_height(module)
            + WEIGHT_FRESHNESS * freshness(module, now)
            + WEIGHT_STATUS * status_weight(module.status);
        total.clamp(0.0, 1.0)
    }
}

/// Distinct genes over total genes. A module with no genes scores zero here.
fn gene_diversity(module: &Module) -> f64 {
    if module.genes.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = module.genes.iter().map(String::as_str).collect();
    distinct.len() as f64 / module.genes.len() as f64
}

fn tier_height(module: &Module) -> f64 {
    f64::from(module.tier) / f64::from(TIER_COUNT)
}

/// Linear decay from 1 at creation to 0 once the module is a week old.
/// Clock skew can make `created_at` sit in the future; the clamp pins that
/// case to 1.
fn freshness(module: &Module, now: DateTime<Utc>) -> f64 {
    let age_hours = now.signed_duration_since(module.created_at).num_seconds() as f64 / 3600.0;
    (1.0 - age_hours / FRESHNESS_WINDOW_HOURS).clamp(0.0, 1.0)
}

fn status_weight(status: ModuleStatus) -> f64 {
    match status {
        ModuleStatus::Optimized => 1.0,
        ModuleStatus::Synced => 0.9,
        ModuleStatus::Active => 0.8,
        ModuleStatus::InTest => 0.6,
        ModuleStatus::Deprecated => 0.2,
        ModuleStatus::Unknown => 0.5,
    }
}
