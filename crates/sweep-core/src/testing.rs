//! Configurable in-process provider double shared by the crate's tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;

use sweep_model::{JobRef, ResourceGroup, Tags};

use crate::provider::{CloudProvider, ProviderError, TerminalStatus};

/// Scripted behavior for the job minted when a group's delete is accepted.
#[derive(Debug, Clone)]
pub enum JobScript {
    /// Terminal success, immediately.
    Succeed,
    /// Terminal success after the given duration.
    SucceedAfter(Duration),
    /// Terminal failure with the given provider message.
    FailWith(String),
    /// Honors the wait timeout and reports the job still running.
    Hang,
    /// Ignores the wait timeout entirely; exercises the monitor's clamp.
    HangIgnoringTimeout,
    /// Polling itself fails.
    PollError(String),
    /// Polling panics; exercises crashed-wait attribution.
    PanicOnPoll,
}

/// In-memory [`CloudProvider`] with scripted failures and call recording.
#[derive(Default)]
pub struct FakeProvider {
    groups: Vec<ResourceGroup>,
    tags: BTreeMap<String, Tags>,
    fail_tags: BTreeSet<String>,
    reject_delete: BTreeMap<String, String>,
    jobs: BTreeMap<String, JobScript>,
    list_error: Option<ProviderError>,
    pub delete_calls: Mutex<Vec<String>>,
    pub wait_calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with the given tags; its delete job succeeds immediately.
    pub fn with_group(mut self, name: &str, tags: Tags) -> Self {
        self.groups.push(ResourceGroup::new(name, "westeurope"));
        self.tags.insert(name.to_string(), tags);
        self.jobs
            .insert(format!("job-{name}"), JobScript::Succeed);
        self
    }

    /// Make `get_tags` fail for the given group.
    pub fn with_tag_failure(mut self, name: &str) -> Self {
        self.fail_tags.insert(name.to_string());
        self
    }

    /// Make `request_delete` reject the given group synchronously.
    pub fn with_delete_rejection(mut self, name: &str, message: &str) -> Self {
        self.reject_delete
            .insert(name.to_string(), message.to_string());
        self
    }

    /// Override the job script for the given group.
    pub fn with_job(mut self, name: &str, script: JobScript) -> Self {
        self.jobs.insert(format!("job-{name}"), script);
        self
    }

    /// Make `list_groups` fail with the given error.
    pub fn with_list_error(mut self, error: ProviderError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CloudProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn list_groups(&self) -> Result<Vec<ResourceGroup>, ProviderError> {
        match &self.list_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.groups.clone()),
        }
    }

    async fn get_tags(&self, group: &str) -> Result<Tags, ProviderError> {
        if self.fail_tags.contains(group) {
            return Err(ProviderError::Transport(format!(
                "tag read failed for {group}"
            )));
        }
        self.tags
            .get(group)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(group.to_string()))
    }

    async fn request_delete(&self, group: &str) -> Result<JobRef, ProviderError> {
        self.delete_calls.lock().unwrap().push(group.to_string());
        if let Some(msg) = self.reject_delete.get(group) {
            return Err(ProviderError::Api(msg.clone()));
        }
        Ok(JobRef::new(format!("job-{group}")))
    }

    async fn wait_for_job(
        &self,
        job: &JobRef,
        timeout: Duration,
    ) -> Result<TerminalStatus, ProviderError> {
        self.wait_calls.lock().unwrap().push(job.as_str().to_string());
        let script = self
            .jobs
            .get(job.as_str())
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(job.to_string()))?;

        match script {
            JobScript::Succeed => Ok(TerminalStatus::Succeeded),
            JobScript::SucceedAfter(d) => {
                if d <= timeout {
                    tokio::time::sleep(d).await;
                    Ok(TerminalStatus::Succeeded)
                } else {
                    tokio::time::sleep(timeout).await;
                    Ok(TerminalStatus::TimedOut)
                }
            }
            JobScript::FailWith(msg) => Ok(TerminalStatus::Failed(msg)),
            JobScript::Hang => {
                tokio::time::sleep(timeout).await;
                Ok(TerminalStatus::TimedOut)
            }
            JobScript::HangIgnoringTimeout => {
                tokio::time::sleep(Duration::from_secs(60 * 60 * 24)).await;
                Ok(TerminalStatus::TimedOut)
            }
            JobScript::PollError(msg) => Err(ProviderError::Transport(msg)),
            JobScript::PanicOnPoll => panic!("poll state corrupted for {job}"),
        }
    }
}
