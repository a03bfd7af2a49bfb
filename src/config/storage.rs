use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GenforgeError, Result};

/// Where modules, counters, audit logs and reports land on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Preferred mirror directories. Every persisted module is written to
    /// each of them.
    pub mirrors: Vec<PathBuf>,
    /// Local root that stands in for mirrors that cannot be created.
    pub fallback_dir: PathBuf,
    pub counters_file: PathBuf,
    pub audit_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mirrors: vec![
                PathBuf::from("/srv/genforge/mirror-a"),
                PathBuf::from("/srv/genforge/mirror-b"),
                PathBuf::from("/srv/genforge/mirror-c"),
            ],
            fallback_dir: PathBuf::from("data/mirrors"),
            counters_file: PathBuf::from("data/counters.json"),
            audit_dir: PathBuf::from("data/audit"),
            report_dir: PathBuf::from("data/reports"),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.mirrors.is_empty() {
            return Err(GenforgeError::Configuration(
                "at least one mirror directory is required".to_string(),
            ));
        }
        Ok(())
    }
}
