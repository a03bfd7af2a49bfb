use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Remote sync settings. Only the credentials location for now; the sync
/// itself is a stub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// `key=value` credentials file. Absent file means sync stays off.
    pub credentials_path: PathBuf,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("genforge.env"),
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
