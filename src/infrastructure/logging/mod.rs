//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout output
//! - JSON log files with rotation via tracing-appender

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};
