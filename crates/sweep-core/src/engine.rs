//! Single-pass cleanup engine.
//!
//! Owns the injected provider, the run configuration and the metrics handle,
//! and drives the phases in order: enumerate, classify, dispatch, optionally
//! monitor, report. There is no persistent state and no scheduler; recovery
//! from any partial failure is simply the next run.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use sweep_model::{RunConfig, RunStatus};

use crate::{
    classify::{classify, classify_unavailable},
    dispatch::dispatch_deletes,
    error::CoreError,
    metrics::{MetricsHandle, noop_metrics},
    monitor::monitor_jobs,
    provider::CloudProvider,
    summary::RunReport,
};

/// One configured cleanup pass over a subscription.
pub struct Sweeper {
    provider: Arc<dyn CloudProvider>,
    config: RunConfig,
    metrics: MetricsHandle,
}

impl Sweeper {
    /// Create an engine for the given provider and configuration.
    ///
    /// Fails if the configuration is invalid; an engine that exists can
    /// always run.
    pub fn new(provider: Arc<dyn CloudProvider>, config: RunConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            metrics: noop_metrics(),
        })
    }

    /// Replace the metrics backend, builder style.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Execute the pass. Always yields a report, even on fatal errors.
    ///
    /// With deletion disabled the pass is a pure preview: groups are still
    /// enumerated and classified, but no mutating call is made and the
    /// report carries the distinguished blocked status.
    #[instrument(level = "info", skip(self), fields(provider = self.provider.name()))]
    pub async fn run(&self) -> RunReport {
        let policy = self.config.policy();

        let groups = match self.provider.list_groups().await {
            Ok(groups) => groups,
            Err(e) => {
                if e.is_auth() {
                    error!(error = %e, "authentication failed; aborting run");
                } else {
                    error!(error = %e, "group enumeration failed; aborting run");
                }
                self.metrics.record_provider_error("list");
                return RunReport::fatal(e.to_string());
            }
        };
        info!(groups = groups.len(), "enumerated resource groups");

        let mut decisions = Vec::with_capacity(groups.len());
        for group in groups {
            // Exclusion wins before any tag is consulted, so the tag fetch
            // is skipped entirely for excluded groups.
            let decision = if policy.is_excluded(&group.name) {
                classify(&group, &policy)
            } else {
                match self.provider.get_tags(&group.name).await {
                    Ok(tags) => classify(&group.with_tags(tags), &policy),
                    Err(e) => {
                        warn!(group = %group.name, error = %e, "tag fetch failed; deleting by default");
                        self.metrics.record_provider_error("tags");
                        classify_unavailable(group.name, group.location)
                    }
                }
            };
            info!(
                group = %decision.group,
                outcome = decision.outcome.as_label(),
                reason = %decision.reason,
                "classified"
            );
            self.metrics.record_decision(decision.outcome);
            decisions.push(decision);
        }

        if self.config.enable_deletion.is_disabled() {
            info!("deletion not enabled; no delete requests were issued");
            return RunReport {
                status: RunStatus::Blocked,
                decisions,
                handles: Vec::new(),
                outcomes: Vec::new(),
                fatal: None,
            };
        }

        let deletes = decisions.iter().filter(|d| d.is_delete()).count();
        info!(deletes, "dispatching deletions");
        let handles = dispatch_deletes(self.provider.as_ref(), &decisions, &self.metrics).await;

        let (status, outcomes) = if self.config.monitor_jobs.is_enabled() {
            let outcomes = monitor_jobs(
                Arc::clone(&self.provider),
                &handles,
                self.config.job_timeout(),
                &self.metrics,
            )
            .await;
            (RunStatus::CompletedMonitored, outcomes)
        } else {
            (RunStatus::CompletedDispatchOnly, Vec::new())
        };

        RunReport {
            status,
            decisions,
            handles,
            outcomes,
            fatal: None,
        }
    }

    /// The run configuration this engine was built with.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[cfg(test)]
    fn decisions_by_name(report: &RunReport) -> Vec<(&str, &sweep_model::Decision)> {
        report
            .decisions
            .iter()
            .map(|d| (d.group.as_str(), d))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sweep_model::{DecisionOutcome, Flag, JobStatus, RetentionReason, RunConfig, RunStatus, Tags};

    use crate::{
        provider::ProviderError,
        testing::{FakeProvider, JobScript},
    };

    use super::Sweeper;

    fn config(delete: bool, monitor: bool) -> RunConfig {
        RunConfig {
            enable_deletion: Flag::from(delete),
            monitor_jobs: Flag::from(monitor),
            job_timeout_secs: 1,
            ..Default::default()
        }
    }

    fn provider() -> FakeProvider {
        FakeProvider::new()
            .with_group("rg-keep", Tags::from([("KeepIt", "true")]))
            .with_group("rg-untagged", Tags::new())
            .with_group("rg-wrong", Tags::from([("keepit", "false")]))
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = RunConfig {
            job_timeout_secs: 0,
            ..Default::default()
        };
        assert!(Sweeper::new(Arc::new(FakeProvider::new()), cfg).is_err());
    }

    #[tokio::test]
    async fn blocked_run_classifies_but_never_mutates() {
        let provider = Arc::new(provider());
        let sweeper = Sweeper::new(Arc::clone(&provider) as _, config(false, false)).unwrap();

        let report = sweeper.run().await;

        assert_eq!(report.status, RunStatus::Blocked);
        assert_eq!(report.decisions.len(), 3);
        assert!(report.handles.is_empty());
        assert_eq!(provider.delete_call_count(), 0);
    }

    #[tokio::test]
    async fn dispatch_only_run_issues_deletes_without_waiting() {
        let provider = Arc::new(provider());
        let sweeper = Sweeper::new(Arc::clone(&provider) as _, config(true, false)).unwrap();

        let report = sweeper.run().await;

        assert_eq!(report.status, RunStatus::CompletedDispatchOnly);
        assert_eq!(report.handles.len(), 2);
        assert!(report.outcomes.is_empty());
        assert_eq!(provider.delete_call_count(), 2);
        assert!(provider.wait_calls.lock().unwrap().is_empty());

        let summary = report.summary();
        assert_eq!(summary.unmonitored, ["rg-untagged", "rg-wrong"]);
    }

    #[tokio::test(start_paused = true)]
    async fn monitored_run_yields_one_outcome_per_accepted_handle() {
        let provider = Arc::new(
            provider()
                .with_group("rg-slow", Tags::new())
                .with_job("rg-slow", JobScript::Hang),
        );
        let sweeper = Sweeper::new(Arc::clone(&provider) as _, config(true, true)).unwrap();

        let report = sweeper.run().await;

        assert_eq!(report.status, RunStatus::CompletedMonitored);
        assert_eq!(report.handles.len(), 3);
        assert_eq!(report.outcomes.len(), 3);

        let summary = report.summary();
        assert_eq!(summary.succeeded.len(), 2);
        assert_eq!(summary.timed_out.len(), 1);
        assert_eq!(summary.timed_out[0].group, "rg-slow");
        assert!(summary.unmonitored.is_empty());
    }

    #[tokio::test]
    async fn enumeration_failure_is_fatal_with_partial_report() {
        let provider = Arc::new(
            FakeProvider::new().with_list_error(ProviderError::Auth("expired token".into())),
        );
        let sweeper = Sweeper::new(provider, config(true, true)).unwrap();

        let report = sweeper.run().await;

        assert_eq!(report.status, RunStatus::FatalEnumerationError);
        assert!(report.decisions.is_empty());
        assert!(report.fatal.as_deref().unwrap().contains("expired token"));
    }

    #[tokio::test]
    async fn tag_fetch_failure_defaults_that_group_to_delete() {
        let provider = Arc::new(provider().with_tag_failure("rg-keep"));
        let sweeper = Sweeper::new(Arc::clone(&provider) as _, config(false, false)).unwrap();

        let report = sweeper.run().await;
        let by_name = Sweeper::decisions_by_name(&report);
        let (_, d) = by_name.iter().find(|(n, _)| *n == "rg-keep").unwrap();

        assert_eq!(d.outcome, DecisionOutcome::Delete);
        assert_eq!(d.reason, RetentionReason::TagsUnavailable);
    }

    #[tokio::test]
    async fn excluded_group_skips_the_tag_fetch() {
        let mut cfg = config(false, false);
        cfg.exclusions.insert("rg-keep".into());
        // Tag fetch would fail, but exclusion short-circuits before it.
        let provider = Arc::new(provider().with_tag_failure("rg-keep"));
        let sweeper = Sweeper::new(Arc::clone(&provider) as _, cfg).unwrap();

        let report = sweeper.run().await;
        let by_name = Sweeper::decisions_by_name(&report);
        let (_, d) = by_name.iter().find(|(n, _)| *n == "rg-keep").unwrap();

        assert_eq!(d.outcome, DecisionOutcome::Keep);
        assert_eq!(d.reason, RetentionReason::Excluded);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_dispatch_still_lets_others_be_monitored() {
        let provider = Arc::new(provider().with_delete_rejection("rg-untagged", "locked"));
        let sweeper = Sweeper::new(Arc::clone(&provider) as _, config(true, true)).unwrap();

        let report = sweeper.run().await;

        assert_eq!(report.handles.len(), 2);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].group, "rg-wrong");
        assert_eq!(report.outcomes[0].status, JobStatus::Succeeded);

        let summary = report.summary();
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].group, "rg-untagged");
    }
}
