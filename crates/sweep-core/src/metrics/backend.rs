use std::sync::Arc;

use sweep_model::{DecisionOutcome, JobStatus};

/// Dispatch result for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// Provider accepted the delete request.
    Accepted,
    /// Provider rejected the delete request synchronously.
    Rejected,
}

impl DispatchResult {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchResult::Accepted => "accepted",
            DispatchResult::Rejected => "rejected",
        }
    }
}

/// Backend metrics collection interface.
///
/// Implementations are injected into the engine and used by every phase of
/// the run.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record one classification decision.
    fn record_decision(&self, outcome: DecisionOutcome);

    /// Record one delete dispatch, accepted or rejected.
    fn record_dispatch(&self, result: DispatchResult);

    /// Record the outcome of one monitored job and how long the wait took.
    fn record_job_outcome(&self, status: JobStatus, wait_ms: u64);

    /// Record a provider error by operation.
    ///
    /// `op` is one of `list`, `tags`, `delete`, `wait`.
    fn record_provider_error(&self, op: &'static str);
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
