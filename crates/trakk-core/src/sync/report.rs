//! Reports returned by mutating operations

use serde::{Deserialize, Serialize};

/// Report from a sync, add, remove or restore operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether every per-ref action succeeded
    pub success: bool,
    /// Actions taken (or, in a dry run, that would be taken)
    pub actions: Vec<String>,
    /// Per-ref failures; processing continued past each of them
    pub errors: Vec<String>,
    /// Refs left untouched on purpose (skipped prompts, nothing to do)
    pub skipped: Vec<String>,
    /// Refs that need a version-control commit, reported only
    pub deferred: Vec<String>,
}

impl SyncReport {
    /// Create an empty successful report
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }

    pub fn error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.success = false;
    }

    pub fn skip(&mut self, message: impl Into<String>) {
        self.skipped.push(message.into());
    }

    pub fn defer(&mut self, message: impl Into<String>) {
        self.deferred.push(message.into());
    }

    /// Whether nothing happened and nothing went wrong.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty() && self.errors.is_empty()
    }
}

/// Options for sync operations
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, report what would happen without prompting or mutating.
    /// Actions are prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}
