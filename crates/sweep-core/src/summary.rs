//! Reporting views over a finished run.
//!
//! No decision logic lives here. [`RunReport`] is the raw collected data;
//! [`RunSummary`] is the deterministic, name-sorted view rendered to logs
//! and to the machine-readable output.

use serde::Serialize;
use tracing::{info, warn};

use sweep_model::{Decision, DeletionHandle, GroupName, JobOutcome, JobStatus, RunStatus};

/// Everything one cleanup pass produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Overall result of the pass.
    pub status: RunStatus,
    /// One decision per enumerated group.
    pub decisions: Vec<Decision>,
    /// One handle per delete decision, accepted or rejected.
    pub handles: Vec<DeletionHandle>,
    /// One outcome per accepted handle, present only when monitoring ran.
    pub outcomes: Vec<JobOutcome>,
    /// Detail of the fatal error, if the run aborted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
}

impl RunReport {
    /// Report for a run that failed before classification.
    pub fn fatal(detail: impl Into<String>) -> Self {
        Self {
            status: RunStatus::FatalEnumerationError,
            decisions: Vec::new(),
            handles: Vec::new(),
            outcomes: Vec::new(),
            fatal: Some(detail.into()),
        }
    }

    /// Build the deterministic summary view.
    pub fn summary(&self) -> RunSummary {
        let mut kept: Vec<Decision> = self.decisions.iter().filter(|d| d.is_keep()).cloned().collect();
        let mut deleted: Vec<Decision> =
            self.decisions.iter().filter(|d| d.is_delete()).cloned().collect();
        kept.sort_by(|a, b| a.group.cmp(&b.group));
        deleted.sort_by(|a, b| a.group.cmp(&b.group));

        let mut rejected: Vec<DeletionHandle> = self
            .handles
            .iter()
            .filter(|h| h.dispatch_error().is_some())
            .cloned()
            .collect();
        rejected.sort_by(|a, b| a.group.cmp(&b.group));

        let mut by_status = |status: JobStatus| -> Vec<JobOutcome> {
            let mut v: Vec<JobOutcome> = self
                .outcomes
                .iter()
                .filter(|o| o.status == status)
                .cloned()
                .collect();
            v.sort_by(|a, b| a.group.cmp(&b.group));
            v
        };
        let succeeded = by_status(JobStatus::Succeeded);
        let failed = by_status(JobStatus::Failed);
        let timed_out = by_status(JobStatus::TimedOut);
        let monitor_errors = by_status(JobStatus::MonitorError);

        // Accepted handles with no outcome: dispatched, not monitored.
        let mut unmonitored: Vec<GroupName> = self
            .handles
            .iter()
            .filter(|h| h.job().is_some())
            .filter(|h| !self.outcomes.iter().any(|o| o.group == h.group))
            .map(|h| h.group.clone())
            .collect();
        unmonitored.sort();

        RunSummary {
            status: self.status,
            kept,
            deleted,
            rejected,
            succeeded,
            failed,
            timed_out,
            monitor_errors,
            unmonitored,
            fatal: self.fatal.clone(),
        }
    }
}

/// Name-sorted, render-ready view of one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub status: RunStatus,
    pub kept: Vec<Decision>,
    pub deleted: Vec<Decision>,
    /// Delete dispatches the provider rejected synchronously.
    pub rejected: Vec<DeletionHandle>,
    pub succeeded: Vec<JobOutcome>,
    pub failed: Vec<JobOutcome>,
    pub timed_out: Vec<JobOutcome>,
    pub monitor_errors: Vec<JobOutcome>,
    /// Groups whose deletion was dispatched but not monitored.
    pub unmonitored: Vec<GroupName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
}

impl RunSummary {
    /// Render the summary as structured log lines.
    pub fn log(&self) {
        info!(
            status = self.status.as_label(),
            kept = self.kept.len(),
            deleted = self.deleted.len(),
            rejected = self.rejected.len(),
            "run summary"
        );
        for d in &self.kept {
            info!(group = %d.group, location = %d.location, reason = %d.reason, "kept");
        }
        for d in &self.deleted {
            info!(group = %d.group, location = %d.location, reason = %d.reason, "marked for deletion");
        }
        for h in &self.rejected {
            warn!(group = %h.group, error = h.dispatch_error().unwrap_or(""), "dispatch rejected");
        }
        for group in &self.unmonitored {
            info!(group = %group, "dispatched, not monitored");
        }
        for o in &self.succeeded {
            info!(group = %o.group, "deletion succeeded");
        }
        for o in &self.failed {
            warn!(group = %o.group, detail = o.detail.as_deref().unwrap_or(""), "deletion failed");
        }
        for o in &self.timed_out {
            warn!(group = %o.group, "wait timed out; job still running");
        }
        for o in &self.monitor_errors {
            warn!(group = %o.group, detail = o.detail.as_deref().unwrap_or(""), "monitoring failed");
        }
        if let Some(fatal) = &self.fatal {
            warn!(error = %fatal, "run aborted");
        }
    }
}
