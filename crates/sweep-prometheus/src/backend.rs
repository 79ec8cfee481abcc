use std::sync::Arc;

use prometheus::{CounterVec, HistogramVec, Opts, Registry, proto::MetricFamily};

use sweep_core::{DispatchResult, MetricsBackend};
use sweep_model::{DecisionOutcome, JobStatus};

/// Prometheus metrics backend for the sweep agent.
///
/// Implements [`MetricsBackend`] and exposes prometheus metrics that can be
/// dumped at the end of a run or scraped via a custom endpoint.
///
/// ## Metrics
/// - `sweep_decisions_total{outcome}` - Counter of classification decisions
/// - `sweep_dispatches_total{result}` - Counter of delete dispatches
/// - `sweep_job_outcomes_total{status}` - Counter of monitored job outcomes
/// - `sweep_job_wait_seconds{status}` - Histogram of monitor wait time
/// - `sweep_provider_errors_total{op}` - Counter of provider call failures
///
/// ## Label cardinality
/// All labels are bounded (low cardinality):
/// - `outcome`: "keep", "delete"
/// - `result`: "accepted", "rejected"
/// - `status`: "succeeded", "failed", "timed_out", "monitor_error"
/// - `op`: "list", "tags", "delete", "wait"
#[derive(Clone)]
pub struct PrometheusMetrics {
    decisions: CounterVec,
    dispatches: CounterVec,
    job_outcomes: CounterVec,
    job_wait: HistogramVec,
    provider_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let decisions = CounterVec::new(
            Opts::new(
                "sweep_decisions_total",
                "Total number of classification decisions",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(decisions.clone()))?;

        let dispatches = CounterVec::new(
            Opts::new(
                "sweep_dispatches_total",
                "Total number of delete dispatches",
            ),
            &["result"],
        )?;
        registry.register(Box::new(dispatches.clone()))?;

        let job_outcomes = CounterVec::new(
            Opts::new(
                "sweep_job_outcomes_total",
                "Total number of monitored deletion job outcomes",
            ),
            &["status"],
        )?;
        registry.register(Box::new(job_outcomes.clone()))?;

        let job_wait = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "sweep_job_wait_seconds",
                "Time spent waiting for deletion jobs in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0]),
            &["status"],
        )?;
        registry.register(Box::new(job_wait.clone()))?;

        let provider_errors = CounterVec::new(
            Opts::new(
                "sweep_provider_errors_total",
                "Total provider call failures",
            ),
            &["op"],
        )?;
        registry.register(Box::new(provider_errors.clone()))?;

        Ok(Self {
            decisions,
            dispatches,
            job_outcomes,
            job_wait,
            provider_errors,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    ///
    /// # Example
    /// ```rust,ignore
    /// let metrics = PrometheusMetrics::new()?;
    /// let families = metrics.gather();
    /// let encoder = prometheus::TextEncoder::new();
    /// encoder.encode(&families, &mut buffer)?;
    /// ```
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Get reference to underlying prometheus registry.
    ///
    /// Useful for registering custom metrics alongside the sweep metrics.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_decision(&self, outcome: DecisionOutcome) {
        self.decisions.with_label_values(&[outcome.as_label()]).inc();
    }

    fn record_dispatch(&self, result: DispatchResult) {
        self.dispatches.with_label_values(&[result.as_label()]).inc();
    }

    fn record_job_outcome(&self, status: JobStatus, wait_ms: u64) {
        self.job_outcomes
            .with_label_values(&[status.as_label()])
            .inc();

        let wait_seconds = wait_ms as f64 / 1000.0;
        self.job_wait
            .with_label_values(&[status.as_label()])
            .observe(wait_seconds);
    }

    fn record_provider_error(&self, op: &'static str) {
        self.provider_errors.with_label_values(&[op]).inc();
    }
}
