use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall result of one cleanup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Deletion was not enabled; no mutating call was made.
    Blocked,
    /// Deletes were dispatched but not monitored.
    CompletedDispatchOnly,
    /// Deletes were dispatched and every accepted job was monitored.
    CompletedMonitored,
    /// The group list could not be obtained; nothing was classified.
    FatalEnumerationError,
}

impl RunStatus {
    /// Label value for logs and metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            RunStatus::Blocked => "blocked",
            RunStatus::CompletedDispatchOnly => "completed_dispatch_only",
            RunStatus::CompletedMonitored => "completed_monitored",
            RunStatus::FatalEnumerationError => "fatal_enumeration_error",
        }
    }

    /// Whether the run ended without a fatal error.
    ///
    /// Individual per-group failures never make a run fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RunStatus::FatalEnumerationError)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
