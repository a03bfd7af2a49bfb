use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{GenforgeError, Result};

/// Status endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,
    pub listen: String,
    /// Node name reported by the status endpoint.
    pub identity: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen: "0.0.0.0:8000".to_string(),
            identity: "genforge-core".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            GenforgeError::Configuration(format!("invalid listen address '{}': {e}", self.listen))
        })?;
        Ok(())
    }
}
