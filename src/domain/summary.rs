//! Run summary types
//!
//! Combines the upgrade and reversion outcomes into the final result.

use super::PhaseOutcome;
use crate::error::{to_exit_code, FALLBACK_EXIT_CODE};
use crate::version::VersionPair;
use std::time::Duration;

/// Outcome of a full upgrade test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Versions that were tested
    pub versions: VersionPair,
    /// Result of testing the target version
    pub upgrade: PhaseOutcome,
    /// Result of re-testing the original version
    pub reversion: PhaseOutcome,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

impl RunSummary {
    /// Creates a new RunSummary
    pub fn new(
        versions: VersionPair,
        upgrade: PhaseOutcome,
        reversion: PhaseOutcome,
        elapsed: Duration,
    ) -> Self {
        Self {
            versions,
            upgrade,
            reversion,
            elapsed,
        }
    }

    /// Returns true if the upgrade passed
    pub fn upgrade_succeeded(&self) -> bool {
        self.upgrade.is_passed()
    }

    /// Returns true if the reversion passed
    pub fn reversion_succeeded(&self) -> bool {
        self.reversion.is_passed()
    }

    /// Returns true if both phases passed
    pub fn is_success(&self) -> bool {
        self.upgrade_succeeded() && self.reversion_succeeded()
    }

    /// Process exit code for this run.
    ///
    /// 0 when both phases passed. Otherwise the exit code of the last
    /// failure (reversion before upgrade), or the fallback when that failure
    /// has no usable code.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            return 0;
        }

        self.reversion
            .failure()
            .or_else(|| self.upgrade.failure())
            .and_then(|failure| failure.code)
            .map_or(FALLBACK_EXIT_CODE, to_exit_code)
    }
}
