use std::{
    fmt,
    str::FromStr,
    sync::{OnceLock, RwLock},
};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::error::LoggerError;

/// Cached local UTC offset, populated by `init_local_offset()`.
static LOCAL_OFFSET: RwLock<UtcOffset> = RwLock::new(UtcOffset::UTC);

/// Whether offset detection has already been attempted.
static INIT_DONE: OnceLock<()> = OnceLock::new();

/// Timezone applied to log timestamps.
///
/// - `Utc`: all timestamps in UTC (always works, default)
/// - `Local`: system timezone, detected once at startup
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    /// UTC timezone.
    #[default]
    Utc,
    /// Local system timezone.
    Local,
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// Detects the local timezone offset and caches it.
///
/// Call in `main()` **before spawning any threads** (before the tokio
/// runtime): offset detection fails in multi-thread contexts on most Unix
/// platforms. Falls back to UTC silently if detection fails.
pub fn init_local_offset() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    if let Ok(mut guard) = LOCAL_OFFSET.write() {
        *guard = offset;
    }
    let _ = INIT_DONE.set(());
}

/// Returns the cached local offset, attempting one detection if
/// `init_local_offset()` was never called.
fn get_or_detect_local_offset() -> UtcOffset {
    INIT_DONE.get_or_init(|| {
        if let Ok(detected) = UtcOffset::current_local_offset() {
            if let Ok(mut guard) = LOCAL_OFFSET.write() {
                *guard = detected;
            }
        } else {
            eprintln!(
                "WARNING: local timezone detection failed. Call init_local_offset() \
                 in main() before the tokio runtime. Falling back to UTC."
            );
        }
    });

    LOCAL_OFFSET.read().map(|guard| *guard).unwrap_or(UtcOffset::UTC)
}

/// RFC3339 timestamp formatter for log lines.
///
/// Configured with the timezone at construction; `Local` reads the offset
/// cached by [`init_local_offset`] on every invocation.
#[derive(Debug, Clone, Copy)]
pub struct Rfc3339Timer {
    tz: LoggerTimeZone,
}

impl Rfc3339Timer {
    pub fn new(tz: LoggerTimeZone) -> Self {
        Self { tz }
    }

    fn now(&self) -> OffsetDateTime {
        match self.tz {
            LoggerTimeZone::Utc => OffsetDateTime::now_utc(),
            LoggerTimeZone::Local => {
                OffsetDateTime::now_utc().to_offset(get_or_detect_local_offset())
            }
        }
    }
}

impl FormatTime for Rfc3339Timer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self.now().format(&Rfc3339) {
            Ok(ts) => write!(w, "{} ", ts),
            Err(_) => write!(w, "<invalid-time> "),
        }
    }
}
