pub mod cycle;
pub mod evolution;
pub mod manager;
pub mod remote;
pub mod server;
pub mod storage;

pub use cycle::CycleConfig;
pub use evolution::EvolutionConfig;
pub use manager::{AppConfig, ConfigManager};
pub use remote::RemoteConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
