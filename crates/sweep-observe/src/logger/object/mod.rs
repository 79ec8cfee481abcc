pub mod format;
pub use format::LoggerFormat;

pub mod level;
pub use level::LoggerLevel;

pub mod time;
pub use time::{LoggerTimeZone, Rfc3339Timer, init_local_offset};
