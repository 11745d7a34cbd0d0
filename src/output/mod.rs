//! Output formatting for run results
//!
//! This module provides:
//! - The formatter trait used by the binary
//! - Text output with SUCCESS/FAILURE banners

mod text;

pub use text::TextFormatter;

use crate::orchestrator::RunOutcome;
use std::io::Write;

/// Configuration for output formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(no_color: bool) -> Self {
        Self { color: !no_color }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the run outcome
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    Box::new(TextFormatter::with_color(config.color))
}
