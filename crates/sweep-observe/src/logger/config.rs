use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration for one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter expression (e.g. "info", "sweep_core=debug,info").
    pub level: LoggerLevel,
    /// Timezone applied to log timestamps.
    pub tz: LoggerTimeZone,
    /// Whether to print module targets in each line.
    pub with_targets: bool,
    /// Whether colored output is allowed.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            // A batch tool's output is read by humans; targets are noise
            // unless explicitly requested.
            with_targets: false,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Whether colored output should actually be emitted.
    ///
    /// Requires both the configuration to allow color and stdout to be a
    /// terminal; output redirected to a file or pipe never gets escape
    /// codes. Evaluated at logger initialization, not config parse time.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
