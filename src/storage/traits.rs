use std::path::PathBuf;

use crate::error::Result;
use crate::types::{Counters, CycleReport, Module};

/// Durable home for the cross-run counters.
pub trait StateStore: Send + Sync {
    /// Load the saved counters. A store with no saved counters yet returns
    /// the defaults; corrupt saved state is an error.
    fn load_counters(&self) -> Result<Counters>;

    /// Replace the saved counters in full.
    fn save_counters(&self, counters: &Counters) -> Result<()>;
}

/// Sink for everything a cycle leaves behind besides the counters.
pub trait ModuleArchive: Send + Sync {
    /// Write one module to every configured mirror. Returns how many mirrors
    /// took the write; failing all of them is an error.
    fn persist_module(&self, module: &Module) -> Result<usize>;

    /// Append the module's line to the current day's audit log.
    fn append_audit(&self, module: &Module) -> Result<()>;

    /// Write the cycle report snapshot and return where it landed.
    fn write_report(&self, report: &CycleReport) -> Result<PathBuf>;
}
