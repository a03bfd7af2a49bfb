use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::config::{CycleConfig, EvolutionConfig, RemoteConfig, ServerConfig, StorageConfig};
use crate::error::{GenforgeError, Result};

/// Whole-application configuration. Every section falls back to its
/// defaults when missing from the file, so an empty or absent config file
/// yields a fully working setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub cycle: CycleConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub remote: RemoteConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        self.cycle.validate()?;
        self.storage.validate()?;
        self.server.validate()?;
        self.remote.validate()?;
        Ok(())
    }
}

/// Owns the shared configuration and its TOML round trip.
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| GenforgeError::Configuration(format!("Failed to read config file: {e}")))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| GenforgeError::Configuration(format!("Failed to parse config file: {e}")))?;
        config.validate()?;
        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.config.read().unwrap();
        let content = toml::to_string_pretty(&*config)
            .map_err(|e| GenforgeError::Configuration(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| GenforgeError::Configuration(format!("Failed to write config file: {e}")))?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    /// Apply an in-place edit, then re-validate the result.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap();
        f(&mut config);
        config.validate()?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
