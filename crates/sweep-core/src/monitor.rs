//! Bounded-wait job monitor.
//!
//! Waits on every accepted deletion job concurrently, each wait capped by
//! the per-job timeout, and classifies the result. Total wall time is
//! therefore close to the slowest single wait, not the sum of all of them.
//!
//! A timed-out wait never cancels the underlying job: `TimedOut` only means
//! this process stopped waiting. A polling failure is `MonitorError`, kept
//! distinct from a job that terminally `Failed`.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{task::JoinSet, time::Instant};
use tracing::{debug, error, warn};

use sweep_model::{DeletionHandle, JobOutcome, JobStatus};

use crate::{
    metrics::MetricsHandle,
    provider::{CloudProvider, TerminalStatus},
};

/// Grace added on top of the per-job timeout before the monitor clamps a
/// wait. The provider receives the timeout and is expected to honor it; the
/// clamp only catches a provider that does not.
const CLAMP_GRACE: Duration = Duration::from_secs(1);

/// Wait for every accepted job in `handles` and classify its outcome.
///
/// Rejected handles carry no job and are skipped. One outcome per accepted
/// handle; one job's failure, timeout or polling error never aborts the
/// waits on the others.
pub async fn monitor_jobs(
    provider: Arc<dyn CloudProvider>,
    handles: &[DeletionHandle],
    timeout: Duration,
    metrics: &MetricsHandle,
) -> Vec<JobOutcome> {
    let monitor_started = Instant::now();
    let mut waits = JoinSet::new();
    // Task id -> group, so a crashed wait task keeps its attribution.
    let mut spawned = HashMap::new();

    for handle in handles {
        let Some(job) = handle.job() else {
            continue;
        };
        let provider = Arc::clone(&provider);
        let group = handle.group.clone();
        let job = job.clone();

        let task = waits.spawn(async move {
            let started = Instant::now();
            let wait = tokio::time::timeout(
                timeout + CLAMP_GRACE,
                provider.wait_for_job(&job, timeout),
            );

            let outcome = match wait.await {
                Err(_) => {
                    warn!(group = %group, job = %job, "provider ignored wait timeout; clamped");
                    JobOutcome::new(group, JobStatus::TimedOut)
                }
                Ok(Err(e)) => {
                    warn!(group = %group, job = %job, error = %e, "polling failed");
                    JobOutcome::with_detail(group, JobStatus::MonitorError, e.to_string())
                }
                Ok(Ok(TerminalStatus::Succeeded)) => {
                    debug!(group = %group, job = %job, "deletion succeeded");
                    JobOutcome::new(group, JobStatus::Succeeded)
                }
                Ok(Ok(TerminalStatus::Failed(detail))) => {
                    warn!(group = %group, job = %job, detail = %detail, "deletion failed");
                    JobOutcome::with_detail(group, JobStatus::Failed, detail)
                }
                Ok(Ok(TerminalStatus::TimedOut)) => {
                    warn!(group = %group, job = %job, "wait timed out; job still running");
                    JobOutcome::new(group, JobStatus::TimedOut)
                }
            };

            (outcome, started.elapsed())
        });
        spawned.insert(task.id(), handle.group.clone());
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = waits.join_next_with_id().await {
        match joined {
            Ok((_, (outcome, waited))) => {
                metrics.record_job_outcome(outcome.status, waited.as_millis() as u64);
                if outcome.status == JobStatus::MonitorError {
                    metrics.record_provider_error("wait");
                }
                outcomes.push(outcome);
            }
            Err(e) => {
                // A crashed wait task says nothing about the job itself, so
                // its handle still gets an outcome: MonitorError, with the
                // join error as detail.
                let Some(group) = spawned.remove(&e.id()) else {
                    error!(error = %e, "monitor wait task failed to join");
                    continue;
                };
                error!(group = %group, error = %e, "monitor wait task crashed");
                let outcome =
                    JobOutcome::with_detail(group, JobStatus::MonitorError, e.to_string());
                metrics
                    .record_job_outcome(outcome.status, monitor_started.elapsed().as_millis() as u64);
                metrics.record_provider_error("wait");
                outcomes.push(outcome);
            }
        }
    }

    outcomes
}
