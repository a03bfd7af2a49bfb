pub mod genes;
pub mod tiers;

pub use genes::{Gene, GeneCategory, GenePool};
pub use tiers::{Tier, TierDirectory, TIER_COUNT};
