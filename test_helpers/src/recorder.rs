//! Recording plugin invocations across a composition run.
//!
//! A [`CallLog`] is cheap to clone and every clone appends to the same
//! underlying log, so test plugins can capture a handle and tests can
//! inspect the order in which plugins ran.
//!
//! # Examples
//!
//! ```
//! use test_helpers::CallLog;
//!
//! let log = CallLog::default();
//! let handle = log.clone();
//! handle.record("with-base");
//! handle.record("with-react");
//! assert_eq!(log.entries(), ["with-base", "with-react"]);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

/// Shared, ordered log of plugin names.
#[derive(Clone, Debug, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Append `name` to the log.
    pub fn record(&self, name: impl Into<String>) {
        self.entries.lock().push(name.into());
    }

    /// Snapshot of every recorded name, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns `true` when `name` was recorded at least once.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().iter().any(|entry| entry == name)
    }
}
