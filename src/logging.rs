//! Tracing subscriber setup
//!
//! `--log` picks the default filter; `RUST_LOG` wins when it is set.
//! Warnings and errors go to stderr, everything else to stdout.

use crate::cli::LogLevel;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

impl LogLevel {
    /// The tracing level this CLI level maps to
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
        }
    }
}

/// Build the filter for the given level
pub fn build_filter(level: LogLevel) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("nodella={}", level.as_level()))
    }
}

/// Initialize the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: LogLevel, ansi: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .without_time()
        .with_ansi(ansi)
        .with_writer(std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout))
        .try_init();
}
