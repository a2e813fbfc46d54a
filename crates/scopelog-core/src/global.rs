//! Shared severity cells, including the process-wide global level.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use crate::severity::{Severity, default_severity};

/// A mutable severity that is read on every log call.
///
/// Used for the process-wide floor and for each logger's own default.
/// Writers are external; readers see whatever value is current at call time.
#[derive(Debug)]
pub struct LevelCell(AtomicU8);

/// The global floor: anything at or above it is emitted regardless of
/// per-logger configuration.
pub type GlobalLevel = LevelCell;

impl LevelCell {
    /// Creates a level cell holding `severity`.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self(AtomicU8::new(severity.to_index()))
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> Severity {
        Severity::from_index(self.0.load(Ordering::Relaxed))
    }

    /// Replaces the value.
    pub fn set(&self, severity: Severity) {
        self.0.store(severity.to_index(), Ordering::Relaxed);
    }
}

impl Default for LevelCell {
    fn default() -> Self {
        Self::new(default_severity())
    }
}

static PROCESS_LEVEL: OnceLock<Arc<GlobalLevel>> = OnceLock::new();

/// The process-wide level, seeded from the environment on first use.
#[must_use]
pub fn process_level() -> Arc<GlobalLevel> {
    PROCESS_LEVEL
        .get_or_init(|| Arc::new(GlobalLevel::default()))
        .clone()
}
