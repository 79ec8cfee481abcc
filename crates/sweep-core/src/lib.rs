pub mod classify;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod provider;
pub mod summary;

pub use classify::{classify, classify_unavailable};
pub use engine::Sweeper;
pub use error::CoreError;
pub use metrics::{DispatchResult, MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
pub use provider::{CloudProvider, ProviderError, TerminalStatus};
pub use summary::{RunReport, RunSummary};

pub mod prelude {
    pub use crate::engine::Sweeper;
    pub use crate::error::CoreError;
    pub use crate::metrics::{MetricsBackend, MetricsHandle, noop_metrics};
    pub use crate::provider::{CloudProvider, ProviderError, TerminalStatus};
    pub use crate::summary::{RunReport, RunSummary};
}

#[cfg(test)]
pub(crate) mod testing;
