//! Metrics collection abstraction for the cleanup run.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are
//! injected into [`crate::engine::Sweeper`]; the engine, dispatcher and
//! monitor record through the shared handle.
mod backend;
pub use backend::{DispatchResult, MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
