//! Progress display while waiting on the network
//!
//! Provides visual feedback during release resolution using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner reporter for indeterminate operations
pub struct Progress {
    /// Whether progress display is enabled (disabled in debug mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Returns true if a spinner is currently shown
    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Show a spinner with a message for an indeterminate operation
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_disabled() {
        let mut progress = Progress::new(false);
        progress.spinner("test");
        assert!(!progress.is_active());
        progress.finish_and_clear();
    }

    #[test]
    fn test_progress_enabled() {
        let mut progress = Progress::new(true);
        progress.spinner("Fetching releases");
        assert!(progress.is_active());
        progress.finish_and_clear();
        assert!(!progress.is_active());
    }
}
