//! Text output formatter for human-readable display
//!
//! This module provides:
//! - SUCCESS/FAILURE banner for the upgrade phase
//! - Reversion status line
//! - Elapsed wall-clock time

use crate::domain::{PhaseOutcome, RunSummary};
use crate::orchestrator::RunOutcome;
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

const SUCCESS_BANNER: &str = r"
  ███████╗██╗   ██╗ ██████╗ ██████╗███████╗███████╗███████╗
  ██╔════╝██║   ██║██╔════╝██╔════╝██╔════╝██╔════╝██╔════╝
  ███████╗██║   ██║██║     ██║     █████╗  ███████╗███████╗
  ╚════██║██║   ██║██║     ██║     ██╔══╝  ╚════██║╚════██║
  ███████║╚██████╔╝╚██████╗╚██████╗███████╗███████║███████║
  ╚══════╝ ╚═════╝  ╚═════╝ ╚═════╝╚══════╝╚══════╝╚══════╝
";

const FAILURE_BANNER: &str = r"
  ███████╗ █████╗ ██╗██╗     ██╗   ██╗██████╗ ███████╗
  ██╔════╝██╔══██╗██║██║     ██║   ██║██╔══██╗██╔════╝
  █████╗  ███████║██║██║     ██║   ██║██████╔╝█████╗
  ██╔══╝  ██╔══██║██║██║     ██║   ██║██╔══██╗██╔══╝
  ██║     ██║  ██║██║███████╗╚██████╔╝██║  ██║███████╗
  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝
";

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn write_banner(&self, passed: bool, writer: &mut dyn Write) -> std::io::Result<()> {
        let banner = if passed { SUCCESS_BANNER } else { FAILURE_BANNER };
        for line in banner.lines() {
            if !self.color {
                writeln!(writer, "{}", line)?;
            } else if passed {
                writeln!(writer, "{}", line.green())?;
            } else {
                writeln!(writer, "{}", line.red())?;
            }
        }
        writeln!(writer)
    }

    fn write_upgrade(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let target = &summary.versions.target;
        match &summary.upgrade {
            PhaseOutcome::Passed => {
                writeln!(writer, "You can successfully upgrade to Node.js v{}", target)
            }
            PhaseOutcome::Failed(failure) => {
                let line = format!("You cannot upgrade to Node.js v{}", target);
                if self.color {
                    writeln!(writer, "{}", line.yellow())?;
                } else {
                    writeln!(writer, "{}", line)?;
                }
                writeln!(writer, "  {}", failure)
            }
        }
    }

    fn write_reversion(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let current = &summary.versions.current;
        match &summary.reversion {
            PhaseOutcome::Passed => writeln!(writer, "Reverted to Node.js v{}", current),
            PhaseOutcome::Failed(failure) => {
                let line = format!("Failed to revert to Node.js v{}", current);
                if self.color {
                    writeln!(writer, "{}", line.yellow())?;
                } else {
                    writeln!(writer, "{}", line)?;
                }
                writeln!(writer, "  {}", failure)
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let RunOutcome::Tested(summary) = outcome else {
            return Ok(());
        };

        self.write_banner(summary.upgrade_succeeded(), writer)?;
        self.write_upgrade(summary, writer)?;
        self.write_reversion(summary, writer)?;
        writeln!(
            writer,
            "Nodella test completed in {:.3} seconds",
            summary.elapsed.as_secs_f64()
        )
    }
}
