use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::GroupName;

/// Opaque reference to an asynchronous deletion job tracked by the provider.
///
/// The system never owns job state; it only holds this handle and may later
/// ask the provider for the job's terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRef(String);

impl JobRef {
    /// Wrap a provider-supplied reference.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What happened when a delete was requested for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "result")]
pub enum DispatchOutcome {
    /// The provider accepted the request and returned a job reference.
    Accepted { job: JobRef },
    /// The provider rejected the request synchronously.
    Rejected { error: String },
}

/// Record of one deletion dispatch, accepted or rejected.
///
/// Every `Delete` decision produces exactly one handle. A rejected dispatch
/// carries the provider's error and has no job to monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionHandle {
    /// Group the delete was requested for.
    pub group: GroupName,
    /// Accepted job reference or synchronous rejection.
    pub outcome: DispatchOutcome,
}

impl DeletionHandle {
    /// Handle for an accepted dispatch.
    pub fn accepted(group: impl Into<GroupName>, job: JobRef) -> Self {
        Self {
            group: group.into(),
            outcome: DispatchOutcome::Accepted { job },
        }
    }

    /// Handle for a synchronously rejected dispatch.
    pub fn rejected(group: impl Into<GroupName>, error: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            outcome: DispatchOutcome::Rejected {
                error: error.into(),
            },
        }
    }

    /// The job reference, if the dispatch was accepted.
    pub fn job(&self) -> Option<&JobRef> {
        match &self.outcome {
            DispatchOutcome::Accepted { job } => Some(job),
            DispatchOutcome::Rejected { .. } => None,
        }
    }

    /// The rejection message, if the dispatch was rejected.
    pub fn dispatch_error(&self) -> Option<&str> {
        match &self.outcome {
            DispatchOutcome::Accepted { .. } => None,
            DispatchOutcome::Rejected { error } => Some(error),
        }
    }
}

/// Terminal classification of one monitored deletion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobStatus {
    /// The deletion completed.
    Succeeded,
    /// The deletion reached a terminal failure on the provider side.
    Failed,
    /// The per-job wait elapsed; the job itself keeps running.
    TimedOut,
    /// Polling the job failed; says nothing about the job itself.
    MonitorError,
}

impl JobStatus {
    /// Label value for logs and metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::TimedOut => "timed_out",
            JobStatus::MonitorError => "monitor_error",
        }
    }
}

/// Result of monitoring one accepted deletion job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutcome {
    /// Group whose deletion was monitored.
    pub group: GroupName,
    /// Terminal classification.
    pub status: JobStatus,
    /// Provider-supplied detail for failures and monitor errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JobOutcome {
    /// Outcome without detail.
    pub fn new(group: impl Into<GroupName>, status: JobStatus) -> Self {
        Self {
            group: group.into(),
            status,
            detail: None,
        }
    }

    /// Outcome carrying a provider or monitor message.
    pub fn with_detail(
        group: impl Into<GroupName>,
        status: JobStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            status,
            detail: Some(detail.into()),
        }
    }
}
