pub mod evolution_engine;
pub mod factory;
pub mod operators;

pub use evolution_engine::{EvolutionEngine, EvolvedGeneration, Population};
pub use factory::{ModuleFactory, Spawn};
