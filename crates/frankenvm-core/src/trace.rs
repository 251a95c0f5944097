//! Ordered observation channel.
//!
//! Scenarios (and their spawned tasks) emit one line per observation
//! into a [`TraceSink`]; the driver snapshots the lines afterward and
//! compares them against the expected contract. The sink is append-only
//! and totally ordered: two emits never interleave within a line.

use parking_lot::Mutex;
use std::sync::Arc;

/// Shared, append-only, ordered line sink.
#[derive(Debug, Clone, Default)]
pub struct TraceSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TraceSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation line.
    pub fn emit(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    /// Copy of all lines emitted so far, in emission order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of lines emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// True when nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
