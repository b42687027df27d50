//! Warning types for non-fatal errors during store loading.
//!
//! A store file can accumulate damage (interrupted writes, manual edits).
//! Loading should not fail outright because one line is broken; instead the
//! reader skips the line and records a [`Warning`] so callers can report it.

use std::sync::{Arc, Mutex};

/// A non-fatal warning that occurred while reading a store file.
///
/// Each variant carries the 1-based line number where the issue occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A line contained JSON that could not be parsed as a store record.
    MalformedRecord {
        /// The 1-based line number where the error occurred.
        line_number: usize,
        /// Description of the parse failure.
        error: String,
    },

    /// A line was skipped without being parsed.
    SkippedLine {
        /// The 1-based line number of the skipped line.
        line_number: usize,
        /// Why the line was skipped.
        reason: String,
    },
}

/// Thread-safe accumulator for [`Warning`]s collected during a load.
#[derive(Debug, Clone, Default)]
pub struct WarningCollector {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned, which can only happen if a
    /// previous `add` panicked while holding the lock.
    pub fn add(&self, warning: Warning) {
        self.warnings
            .lock()
            .expect("warning collector mutex poisoned")
            .push(warning);
    }

    /// Number of warnings collected so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings
            .lock()
            .expect("warning collector mutex poisoned")
            .len()
    }

    /// Whether no warnings have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the collector, returning all collected warnings.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        match Arc::try_unwrap(self.warnings) {
            Ok(mutex) => mutex
                .into_inner()
                .expect("warning collector mutex poisoned"),
            Err(shared) => shared
                .lock()
                .expect("warning collector mutex poisoned")
                .clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_accumulates_warnings() {
        let collector = WarningCollector::new();
        assert!(collector.is_empty());

        collector.add(Warning::MalformedRecord {
            line_number: 3,
            error: "unexpected end of input".to_string(),
        });
        collector.add(Warning::SkippedLine {
            line_number: 7,
            reason: "empty line".to_string(),
        });

        let warnings = collector.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            Warning::MalformedRecord { line_number: 3, .. }
        ));
    }

    #[test]
    fn clones_share_storage() {
        let collector = WarningCollector::new();
        let clone = collector.clone();

        clone.add(Warning::SkippedLine {
            line_number: 1,
            reason: "test".to_string(),
        });

        assert_eq!(collector.len(), 1);
    }
}
