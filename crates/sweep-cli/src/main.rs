use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use sweep_core::{CloudProvider, Sweeper};
use sweep_model::{Flag, RunConfig, RunStatus};
use sweep_observe::{LoggerConfig, LoggerLevel, LoggerTimeZone, init_local_offset, init_logger};
use sweep_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
use sweep_provider::{Fixture, SimProvider};

/// Policy-driven cleanup agent for cloud resource groups.
///
/// Enumerates the resource groups described by a fixture file, classifies
/// each one against the retention policy, and (when `--delete` is given)
/// dispatches deletion jobs. Without `--delete` the run is a dry-run
/// preview: decisions are reported, nothing is mutated.
#[derive(Debug, Parser)]
#[command(name = "sweep", version)]
struct Args {
    /// Fixture file describing the simulated subscription (JSON).
    #[arg(long, value_name = "PATH")]
    fixture: std::path::PathBuf,

    /// Run configuration file (JSON). CLI flags override its fields.
    #[arg(long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Enable deletion. Without this flag the run is blocked (dry-run).
    #[arg(long)]
    delete: bool,

    /// Wait for dispatched deletion jobs and report their outcome.
    #[arg(long)]
    monitor: bool,

    /// Per-job wait budget in seconds when monitoring.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Group name that is always preserved. May be repeated.
    #[arg(long = "exclude", value_name = "NAME")]
    exclusions: Vec<String>,

    /// Tag key inspected by the classifier (matched case-insensitively).
    #[arg(long, value_name = "KEY")]
    tag_key: Option<String>,

    /// Tag value that preserves a group (matched case-sensitively).
    #[arg(long, value_name = "VALUE")]
    keep_value: Option<String>,

    /// Log output format: text|json|journald.
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    log_format: String,

    /// Log filter, e.g. "info" or "sweep_core=debug,info".
    #[arg(long, default_value = "info", value_name = "FILTER")]
    log_level: String,

    /// Timezone for log timestamps: utc|local.
    #[arg(long, default_value = "utc", value_name = "TZ")]
    log_tz: String,

    /// Also print the full run report as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Dump prometheus counters in text format after the run.
    #[arg(long)]
    metrics: bool,
}

impl Args {
    /// Merge the config file (if any) with CLI overrides.
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RunConfig::default(),
        };

        if self.delete {
            cfg.enable_deletion = Flag::enabled();
        }
        if self.monitor {
            cfg.monitor_jobs = Flag::enabled();
        }
        if let Some(secs) = self.timeout_secs {
            cfg.job_timeout_secs = secs;
        }
        cfg.exclusions.extend(self.exclusions.iter().cloned());
        if let Some(key) = &self.tag_key {
            cfg.tag_key = key.clone();
        }
        if let Some(value) = &self.keep_value {
            cfg.keep_value = value.clone();
        }
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Local offset detection must happen before any thread exists, so the
    // logger and the runtime are set up by hand instead of #[tokio::main].
    let tz: LoggerTimeZone = args.log_tz.parse()?;
    if tz == LoggerTimeZone::Local {
        init_local_offset();
    }
    let logger = LoggerConfig {
        format: args.log_format.parse()?,
        level: LoggerLevel::new(&args.log_level)?,
        tz,
        ..Default::default()
    };
    init_logger(&logger)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?
        .block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = args.run_config()?;

    let fixture = Fixture::load(&args.fixture)
        .with_context(|| format!("loading fixture {}", args.fixture.display()))?;
    let provider = Arc::new(SimProvider::new(fixture)?);

    info!(
        provider = provider.name(),
        delete = config.enable_deletion.value(),
        monitor = config.monitor_jobs.value(),
        timeout_secs = config.job_timeout_secs,
        exclusions = config.exclusions.len(),
        "starting cleanup pass"
    );

    let metrics = if args.metrics {
        Some(PrometheusMetrics::new().context("creating metrics registry")?)
    } else {
        None
    };

    let mut sweeper = Sweeper::new(provider, config)?;
    if let Some(m) = &metrics {
        sweeper = sweeper.with_metrics(Arc::new(m.clone()));
    }

    let report = sweeper.run().await;
    info!(status = %report.status, "cleanup pass finished");

    report.summary().log();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(m) = &metrics {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&m.gather(), &mut buf)?;
        print!("{}", String::from_utf8_lossy(&buf));
    }

    Ok(match report.status {
        RunStatus::FatalEnumerationError => ExitCode::from(1),
        RunStatus::Blocked => ExitCode::from(2),
        RunStatus::CompletedDispatchOnly | RunStatus::CompletedMonitored => ExitCode::SUCCESS,
    })
}
