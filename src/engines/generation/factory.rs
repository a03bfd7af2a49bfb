use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use sha3::{Digest, Sha3_256};

use crate::catalog::{Gene, GenePool, TierDirectory};
use crate::engines::generation::operators;
use crate::types::{Module, ModuleStatus};

/// A freshly built module together with how many mutations its gene list
/// took on the way out of the factory.
#[derive(Debug, Clone)]
pub struct Spawn {
    pub module: Module,
    pub mutations: u32,
}

/// Builds modules for a given tier, either from scratch or from inherited
/// parent genes.
pub struct ModuleFactory {
    pool: Arc<GenePool>,
    tiers: Arc<TierDirectory>,
    mutation_rate: f64,
}

impl ModuleFactory {
    pub fn new(pool: Arc<GenePool>, tiers: Arc<TierDirectory>, mutation_rate: f64) -> Self {
        Self {
            pool,
            tiers,
            mutation_rate,
        }
    }

    /// Build one module in `tier`.
    ///
    /// Without parent genes the module starts with one random tag per pool
    /// category. With parent genes it starts from a copy of them and takes a
    /// single mutation roll; inherited tags survive unchanged whenever the
    /// roll fails or the rate is zero.
    ///
    /// # Panics
    ///
    /// Panics when `tier` lies outside the tier directory. Callers derive
    /// tiers from the directory itself, so an out-of-range ordinal is a
    /// programming error, not an input error.
    pub fn generate<R: Rng>(
        &self,
        tier: u8,
        parent_genes: Option<&[Gene]>,
        rng: &mut R,
    ) -> Spawn {
        let tier_entry = self
            .tiers
            .get(tier)
            .unwrap_or_else(|| panic!("tier ordinal {tier} outside the tier directory"));

        let (genes, mutations) = match parent_genes {
            Some(parents) => {
                let mut inherited = parents.to_vec();
                let mutated = operators::mutate(&mut inherited, self.mutation_rate, &self.pool, rng);
                (inherited, u32::from(mutated))
            }
            None => (self.pool.draw_one_per_category(rng), 0),
        };

        let id = new_module_id(rng);
        let module = Module {
            name: format!("{}-{}g", tier_entry.name, genes.len()),
            content_hash: content_hash(&id),
            id,
            tier,
            genes,
            status: ModuleStatus::Active,
            created_at: Utc::now(),
        };
        Spawn { module, mutations }
    }
}

/// `<unix-seconds>-<8 hex chars>`. The random half keeps ids from colliding
/// within one second.
fn new_module_id<R: Rng>(rng: &mut R) -> String {
    format!("{}-{:08x}", Utc::now().timestamp(), rng.gen::<u32>())
}

/// First 16 hex chars of the SHA3-256 digest of the id.
fn content_hash(id: &str) -> String {
    let digest = Sha3_256::digest(id.as_bytes());
    hex::encode(&digest[..8])
}
