use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::error::{GenforgeError, Result};
use crate::storage::traits::{ModuleArchive, StateStore};
use crate::types::{Counters, CycleReport, Module};

/// In-memory store for tests. Records everything the cycle loop hands it
/// and can be told to reject counter saves.
#[derive(Default)]
pub struct MemoryStore {
    counters: Mutex<Option<Counters>>,
    modules: Mutex<Vec<Module>>,
    audit: Mutex<Vec<String>>,
    reports: Mutex<Vec<CycleReport>>,
    fail_counter_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save_counters` call fail.
    pub fn fail_counter_saves(&self, fail: bool) {
        self.fail_counter_saves.store(fail, Ordering::SeqCst);
    }

    pub fn saved_counters(&self) -> Option<Counters> {
        self.counters.lock().unwrap().clone()
    }

    pub fn persisted_modules(&self) -> Vec<Module> {
        self.modules.lock().unwrap().clone()
    }

    pub fn audit_lines(&self) -> Vec<String> {
        self.audit.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<CycleReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl StateStore for MemoryStore {
    fn load_counters(&self) -> Result<Counters> {
        Ok(self.counters.lock().unwrap().clone().unwrap_or_default())
    }

    fn save_counters(&self, counters: &Counters) -> Result<()> {
        if self.fail_counter_saves.load(Ordering::SeqCst) {
            return Err(GenforgeError::Storage(
                "memory store told to reject counter saves".to_string(),
            ));
        }
        *self.counters.lock().unwrap() = Some(counters.clone());
        Ok(())
    }
}

impl ModuleArchive for MemoryStore {
    fn persist_module(&self, module: &Module) -> Result<usize> {
        self.modules.lock().unwrap().push(module.clone());
        Ok(1)
    }

    fn append_audit(&self, module: &Module) -> Result<()> {
        self.audit.lock().unwrap().push(format!(
            "{} | {} | tier {} | {} genes",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            module.id,
            module.tier,
            module.genes.len()
        ));
        Ok(())
    }

    fn write_report(&self, report: &CycleReport) -> Result<PathBuf> {
        let path = PathBuf::from(format!("report_{}.json", report.cycle));
        self.reports.lock().unwrap().push(report.clone());
        Ok(path)
    }
}
