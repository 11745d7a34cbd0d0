//! Core domain models for nodella
//!
//! This module contains the result types threaded through a run:
//! - Steps of testing one Node.js version and their outcomes
//! - The summary combining the upgrade and reversion phases

mod phase;
mod summary;

pub use phase::{PhaseOutcome, Step, StepFailure};
pub use summary::RunSummary;
