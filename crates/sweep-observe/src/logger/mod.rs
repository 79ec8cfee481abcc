mod config;
mod error;
mod init;
mod object;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, init_local_offset};

/// Install the global tracing subscriber described by `cfg`.
///
/// After this returns, every `tracing` macro in the process emits through
/// the configured format. Can only succeed once per process.
///
/// When `cfg.tz` is [`LoggerTimeZone::Local`], call [`init_local_offset`]
/// first, before any thread is spawned; offset detection is unreliable in
/// multi-threaded processes on most Unix platforms.
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg),
        LoggerFormat::Json => init::logger_json(cfg),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
