//! Diagnostics sink for non-fatal translation issues.
//!
//! Per-field problems (unsupported `set` fields, non-basic map keys, dropped
//! rpc arguments) are reported here and translation continues. The sink is an
//! explicit value handed to each translator at construction, so tests can
//! capture diagnostics without global state.

use std::cell::RefCell;

pub trait Diagnostics {
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards to the `log` facade. The CLI installs `env_logger` on top.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, msg: &str) {
        log::warn!("{}", msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{}", msg);
    }
}

/// Collects diagnostics in memory. Translation is single-threaded, so plain
/// interior mutability is enough.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: RefCell<Vec<String>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn warn(&self, msg: &str) {
        self.entries.borrow_mut().push(format!("warn: {}", msg));
    }

    fn error(&self, msg: &str) {
        self.entries.borrow_mut().push(format!("error: {}", msg));
    }
}
