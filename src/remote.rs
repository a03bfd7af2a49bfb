//! Remote report sync. Credentials parsing is real; the push itself is a
//! logged no-op until a remote endpoint exists.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::types::CycleReport;

const TOKEN_KEY: &str = "SYNC_TOKEN";
const OWNER_KEY: &str = "SYNC_OWNER";
const REPO_KEY: &str = "SYNC_REPO";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncCredentials {
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl SyncCredentials {
    /// Read credentials from a `key=value` file. A missing or unreadable
    /// file yields empty credentials, which just leaves sync off.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!("no credentials file at {}, remote sync off", path.display());
                return Self::default();
            }
        };
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Self {
        let mut credentials = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                TOKEN_KEY => credentials.token = value,
                OWNER_KEY => credentials.owner = value,
                REPO_KEY => credentials.repo = value,
                _ => {}
            }
        }
        credentials
    }

    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}

pub struct RemoteSync {
    credentials: SyncCredentials,
}

impl RemoteSync {
    pub fn new(credentials: SyncCredentials) -> Self {
        Self { credentials }
    }

    /// A sync that never fires, for tests and credential-less setups.
    pub fn disabled() -> Self {
        Self::new(SyncCredentials::default())
    }

    /// Announce the report that would be pushed. No network call is made.
    pub fn push_report(&self, report: &CycleReport, path: &Path) {
        if !self.credentials.is_configured() {
            debug!("remote sync skipped, no token configured");
            return;
        }
        info!(
            "remote sync stub: would push {} (cycle {}) to {}/{}",
            path.display(),
            report.cycle,
            self.credentials.owner,
            self.credentials.repo
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_known_keys_and_skips_noise() {
        let contents = "\
# deployment credentials
SYNC_TOKEN = tok-123
SYNC_OWNER=forge-org

SYNC_REPO=module-archive
UNRELATED=ignored
not a key value line
";
        let credentials = SyncCredentials::parse(contents);
        assert_eq!(credentials.token, "tok-123");
        assert_eq!(credentials.owner, "forge-org");
        assert_eq!(credentials.repo, "module-archive");
        assert!(credentials.is_configured());
    }

    #[test]
    fn missing_file_loads_empty_credentials() {
        let credentials = SyncCredentials::load(Path::new("/nonexistent/genforge.env"));
        assert_eq!(credentials, SyncCredentials::default());
        assert!(!credentials.is_configured());
    }

    #[test]
    fn empty_token_means_not_configured() {
        let credentials = SyncCredentials::parse("SYNC_OWNER=o\nSYNC_REPO=r\n");
        assert!(!credentials.is_configured());
    }
}
