//! Prometheus metrics backend for the sweep cleanup agent.
//!
//! This crate provides a [`PrometheusMetrics`] implementation of
//! [`sweep_core::MetricsBackend`] that exposes metrics in Prometheus format.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use sweep_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let handle: sweep_core::MetricsHandle = Arc::new(metrics.clone());
//!
//! // Pass `handle` to `Sweeper::with_metrics`, then expose the text format:
//! // let families = metrics.gather();
//! // let encoder = prometheus::TextEncoder::new();
//! // encoder.encode(&families, &mut buffer)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `sweep_decisions_total{outcome}` - Counter
//! - `sweep_dispatches_total{result}` - Counter
//! - `sweep_job_outcomes_total{status}` - Counter
//! - `sweep_job_wait_seconds{status}` - Histogram
//! - `sweep_provider_errors_total{op}` - Counter
//!
//! ## HTTP Server
//! This crate does NOT serve a `/metrics` endpoint. The agent is a one-shot
//! batch process; use [`PrometheusMetrics::gather`] with a `TextEncoder` to
//! dump the final counters, or wire the registry into your own exporter.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
