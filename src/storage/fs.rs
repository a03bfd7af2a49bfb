use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use log::{debug, warn};

use crate::config::StorageConfig;
use crate::error::{GenforgeError, Result};
use crate::storage::traits::{ModuleArchive, StateStore};
use crate::types::{Counters, CycleReport, Module};

/// Filesystem-backed store: mirrored module files, a counters file, daily
/// audit logs and per-cycle reports.
pub struct FsStore {
    mirrors: Vec<PathBuf>,
    counters_file: PathBuf,
    audit_dir: PathBuf,
    report_dir: PathBuf,
}

impl FsStore {
    /// Bootstrap the on-disk layout.
    ///
    /// Each preferred mirror that cannot be created is swapped for a
    /// same-named directory under the fallback root, so the store always
    /// ends up with the configured number of mirrors. Failing to create the
    /// fallback, the audit, report or counters directories is fatal.
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let mut mirrors = Vec::with_capacity(config.mirrors.len());
        for (index, preferred) in config.mirrors.iter().enumerate() {
            match fs::create_dir_all(preferred) {
                Ok(()) => mirrors.push(preferred.clone()),
                Err(err) => {
                    let name = preferred
                        .file_name()
                        .map(|n| n.to_os_string())
                        .unwrap_or_else(|| OsString::from(format!("mirror-{index}")));
                    let fallback = config.fallback_dir.join(name);
                    warn!(
                        "mirror {} unavailable ({err}), using {} instead",
                        preferred.display(),
                        fallback.display()
                    );
                    fs::create_dir_all(&fallback)?;
                    mirrors.push(fallback);
                }
            }
        }

        if let Some(parent) = config.counters_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&config.audit_dir)?;
        fs::create_dir_all(&config.report_dir)?;

        Ok(Self {
            mirrors,
            counters_file: config.counters_file.clone(),
            audit_dir: config.audit_dir.clone(),
            report_dir: config.report_dir.clone(),
        })
    }

    pub fn mirrors(&self) -> &[PathBuf] {
        &self.mirrors
    }
}

impl StateStore for FsStore {
    fn load_counters(&self) -> Result<Counters> {
        if !self.counters_file.exists() {
            debug!(
                "no counters file at {}, starting from zero",
                self.counters_file.display()
            );
            return Ok(Counters::default());
        }
        let contents = fs::read_to_string(&self.counters_file)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_counters(&self, counters: &Counters) -> Result<()> {
        let payload = serde_json::to_string_pretty(counters)?;
        fs::write(&self.counters_file, payload)?;
        Ok(())
    }
}

impl ModuleArchive for FsStore {
    fn persist_module(&self, module: &Module) -> Result<usize> {
        let payload = serde_json::to_string_pretty(module)?;
        let file_name = format!("{}.json", module.id);
        let mut written = 0usize;
        for mirror in &self.mirrors {
            let path = mirror.join(&file_name);
            match fs::write(&path, &payload) {
                Ok(()) => written += 1,
                Err(err) => warn!("mirror write failed for {}: {err}", path.display()),
            }
        }
        if written == 0 {
            return Err(GenforgeError::Storage(format!(
                "module {} reached no mirror",
                module.id
            )));
        }
        Ok(written)
    }

    fn append_audit(&self, module: &Module) -> Result<()> {
        let now = Utc::now();
        let path = self
            .audit_dir
            .join(format!("genforge-{}.log", now.format("%Y-%m-%d")));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(
            file,
            "{} | {} | tier {} | {} genes",
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
            module.id,
            module.tier,
            module.genes.len()
        )?;
        Ok(())
    }

    fn write_report(&self, report: &CycleReport) -> Result<PathBuf> {
        let stamp = report.generated_at.format("%Y%m%d_%H%M%S");
        let path = self.report_dir.join(format!("report_{stamp}.json"));
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModuleStatus;
    use tempfile::tempdir;

    fn config_under(root: &std::path::Path) -> StorageConfig {
        StorageConfig {
            mirrors: vec![
                root.join("mirror-a"),
                root.join("mirror-b"),
                root.join("mirror-c"),
            ],
            fallback_dir: root.join("fallback"),
            counters_file: root.join("counters.json"),
            audit_dir: root.join("audit"),
            report_dir: root.join("reports"),
        }
    }

    fn sample_module() -> Module {
        Module {
            id: "1700000000-0badc0de".to_string(),
            name: "tri-model-3g".to_string(),
            tier: 5,
            genes: vec!["grok".to_string(), "claude".to_string(), "gemini".to_string()],
            status: ModuleStatus::Active,
            created_at: Utc::now(),
            content_hash: "0123456789abcdef".to_string(),
        }
    }

    #[test]
    fn counters_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(&config_under(dir.path())).unwrap();
        let counters = Counters {
            modules_generated: 12,
            cycles_completed: 3,
            ..Counters::default()
        };
        store.save_counters(&counters).unwrap();
        assert_eq!(store.load_counters().unwrap(), counters);
    }

    #[test]
    fn missing_counters_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(&config_under(dir.path())).unwrap();
        assert_eq!(store.load_counters().unwrap(), Counters::default());
    }

    #[test]
    fn corrupt_counters_file_is_an_error() {
        let dir = tempdir().unwrap();
        let config = config_under(dir.path());
        let store = FsStore::new(&config).unwrap();
        fs::write(&config.counters_file, "not json at all").unwrap();
        assert!(store.load_counters().is_err());
    }

    #[test]
    fn module_lands_on_every_mirror() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(&config_under(dir.path())).unwrap();
        let module = sample_module();
        assert_eq!(store.persist_module(&module).unwrap(), 3);
        for mirror in store.mirrors() {
            let raw = fs::read_to_string(mirror.join("1700000000-0badc0de.json")).unwrap();
            let loaded: Module = serde_json::from_str(&raw).unwrap();
            assert_eq!(loaded.id, module.id);
            assert_eq!(loaded.genes, module.genes);
        }
    }

    #[test]
    fn losing_a_mirror_degrades_instead_of_failing() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(&config_under(dir.path())).unwrap();
        fs::remove_dir_all(&store.mirrors()[2]).unwrap();
        assert_eq!(store.persist_module(&sample_module()).unwrap(), 2);
    }

    #[test]
    fn losing_every_mirror_is_an_error() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(&config_under(dir.path())).unwrap();
        for mirror in store.mirrors() {
            fs::remove_dir_all(mirror).unwrap();
        }
        assert!(store.persist_module(&sample_module()).is_err());
    }

    #[test]
    fn unreachable_mirror_falls_back_to_local_directory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "file in the way").unwrap();
        let mut config = config_under(dir.path());
        config.mirrors[0] = blocker.join("mirror-a");
        let store = FsStore::new(&config).unwrap();
        assert_eq!(store.mirrors()[0], config.fallback_dir.join("mirror-a"));
        assert!(store.mirrors()[0].is_dir());
    }

    #[test]
    fn audit_lines_accumulate_in_a_dated_file() {
        let dir = tempdir().unwrap();
        let config = config_under(dir.path());
        let store = FsStore::new(&config).unwrap();
        let module = sample_module();
        store.append_audit(&module).unwrap();
        store.append_audit(&module).unwrap();
        let expected = config
            .audit_dir
            .join(format!("genforge-{}.log", Utc::now().format("%Y-%m-%d")));
        let contents = fs::read_to_string(expected).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1700000000-0badc0de"));
        assert!(lines[0].contains("tier 5"));
        assert!(lines[0].contains("3 genes"));
    }

    #[test]
    fn report_file_is_timestamped_and_readable() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(&config_under(dir.path())).unwrap();
        let report = CycleReport {
            generated_at: Utc::now(),
            cycle: 7,
            retained: 2,
            best_fitness: 0.91,
            top_modules: vec![],
            counters: Counters::default(),
        };
        let path = store.write_report(&report).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".json"));
        let loaded: CycleReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.cycle, 7);
    }
}
