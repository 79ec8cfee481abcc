use sweep_model::{DecisionOutcome, JobStatus};

use crate::metrics::backend::{DispatchResult, MetricsBackend};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_decision(&self, _: DecisionOutcome) {}

    #[inline(always)]
    fn record_dispatch(&self, _: DispatchResult) {}

    #[inline(always)]
    fn record_job_outcome(&self, _: JobStatus, _: u64) {}

    #[inline(always)]
    fn record_provider_error(&self, _: &'static str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn noop_can_be_called_repeatedly() {
        let metrics = NoOpMetrics;
        for _ in 0..1000 {
            metrics.record_decision(DecisionOutcome::Delete);
            metrics.record_dispatch(DispatchResult::Accepted);
            metrics.record_job_outcome(JobStatus::Succeeded, 100);
            metrics.record_provider_error("wait");
        }
    }
}
