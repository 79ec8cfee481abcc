//! The narrow seam to the external cloud control plane.
//!
//! Everything this system asks of the provider fits in four operations;
//! concrete backends implement [`CloudProvider`] and are injected into the
//! engine. The real cloud SDK wrapper lives behind this trait and is not
//! part of the core.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use sweep_model::{JobRef, ResourceGroup, Tags};

/// Error surfaced by any provider operation.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("provider api error: {0}")]
    Api(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Whether this is an authentication failure.
    ///
    /// Auth failures abort the whole run; other errors are contained to the
    /// operation that raised them.
    pub fn is_auth(&self) -> bool {
        matches!(self, ProviderError::Auth(_))
    }
}

/// State of a deletion job when a bounded wait returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalStatus {
    /// The job reached successful completion.
    Succeeded,
    /// The job reached a terminal failure; the message is provider-supplied.
    Failed(String),
    /// The wait budget elapsed with the job still running.
    TimedOut,
}

/// Asynchronous cloud control-plane client for one subscription.
///
/// Implementations must be safe to share across tasks: the monitor waits on
/// several jobs concurrently through the same provider instance.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Provider name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Enumerate all resource groups in the subscription.
    ///
    /// Tags are not guaranteed to be populated here; the engine fetches them
    /// per group via [`CloudProvider::get_tags`]. Failure is fatal to the run.
    async fn list_groups(&self) -> Result<Vec<ResourceGroup>, ProviderError>;

    /// Fetch the tags of one group.
    ///
    /// Failure is contained to that group and resolves to deletion
    /// (fail-open-to-delete).
    async fn get_tags(&self, group: &str) -> Result<Tags, ProviderError>;

    /// Request asynchronous deletion of one group.
    ///
    /// Returns immediately with a job reference, or with a synchronous
    /// rejection. Never blocks on the deletion itself.
    async fn request_delete(&self, group: &str) -> Result<JobRef, ProviderError>;

    /// Block until the job reaches a terminal state or `timeout` elapses.
    ///
    /// A timed-out wait returns [`TerminalStatus::TimedOut`]; the job itself
    /// is not cancelled and keeps running on the provider side.
    async fn wait_for_job(
        &self,
        job: &JobRef,
        timeout: Duration,
    ) -> Result<TerminalStatus, ProviderError>;
}
