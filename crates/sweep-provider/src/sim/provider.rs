use std::{collections::BTreeMap, sync::Mutex, time::Duration};

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, trace};
use uuid::Uuid;

use sweep_core::provider::{CloudProvider, ProviderError, TerminalStatus};
use sweep_model::{JobRef, ResourceGroup, Tags};

use crate::{
    error::FixtureError,
    sim::fixture::{Fixture, GroupFixture},
};

/// State of one dispatched simulated deletion job.
#[derive(Debug, Clone)]
struct JobState {
    group: String,
    /// Tokio-clock instant at which the job reaches its terminal state.
    deadline: Instant,
    fails_with: Option<String>,
}

/// [`CloudProvider`] that plays a [`Fixture`] against the tokio clock.
///
/// Jobs dispatched here really take their scripted duration, so a rehearsal
/// run exercises the same dispatch and monitoring paths a cloud-backed
/// provider would.
pub struct SimProvider {
    groups: Vec<GroupFixture>,
    by_name: BTreeMap<String, GroupFixture>,
    enumeration_error: Option<String>,
    jobs: Mutex<BTreeMap<String, JobState>>,
}

impl SimProvider {
    /// Build a provider from a validated fixture.
    pub fn new(fixture: Fixture) -> Result<Self, FixtureError> {
        fixture.validate()?;
        let by_name = fixture
            .groups
            .iter()
            .map(|g| (g.name.clone(), g.clone()))
            .collect();
        Ok(Self {
            groups: fixture.groups,
            by_name,
            enumeration_error: fixture.enumeration_error,
            jobs: Mutex::new(BTreeMap::new()),
        })
    }

    fn script(&self, group: &str) -> Result<&GroupFixture, ProviderError> {
        self.by_name
            .get(group)
            .ok_or_else(|| ProviderError::NotFound(group.to_string()))
    }
}

#[async_trait]
impl CloudProvider for SimProvider {
    fn name(&self) -> &'static str {
        "sim"
    }

    async fn list_groups(&self) -> Result<Vec<ResourceGroup>, ProviderError> {
        if let Some(message) = &self.enumeration_error {
            return Err(ProviderError::Api(message.clone()));
        }
        Ok(self
            .groups
            .iter()
            .map(|g| ResourceGroup::new(g.name.clone(), g.location.clone()))
            .collect())
    }

    async fn get_tags(&self, group: &str) -> Result<Tags, ProviderError> {
        let script = self.script(group)?;
        if script.tags_unavailable {
            return Err(ProviderError::Transport(format!(
                "tag read failed for {group}"
            )));
        }
        Ok(script.tags.clone())
    }

    async fn request_delete(&self, group: &str) -> Result<JobRef, ProviderError> {
        let script = self.script(group)?;
        if let Some(message) = &script.reject_delete {
            return Err(ProviderError::Api(message.clone()));
        }

        let job = JobRef::new(format!("sim-{}", Uuid::new_v4()));
        let state = JobState {
            group: group.to_string(),
            deadline: Instant::now() + Duration::from_millis(script.job.duration_ms),
            fails_with: script.job.fails_with.clone(),
        };
        debug!(group, job = %job, duration_ms = script.job.duration_ms, "simulated delete dispatched");
        self.jobs.lock().unwrap().insert(job.as_str().to_string(), state);
        Ok(job)
    }

    async fn wait_for_job(
        &self,
        job: &JobRef,
        timeout: Duration,
    ) -> Result<TerminalStatus, ProviderError> {
        let state = {
            let jobs = self.jobs.lock().unwrap();
            jobs.get(job.as_str())
                .cloned()
                .ok_or_else(|| ProviderError::NotFound(job.to_string()))?
        };

        let remaining = state.deadline.saturating_duration_since(Instant::now());
        if remaining > timeout {
            tokio::time::sleep(timeout).await;
            trace!(group = %state.group, job = %job, "simulated wait timed out");
            return Ok(TerminalStatus::TimedOut);
        }

        tokio::time::sleep(remaining).await;
        match state.fails_with {
            Some(message) => Ok(TerminalStatus::Failed(message)),
            None => Ok(TerminalStatus::Succeeded),
        }
    }
}
