//! Test phase steps and outcomes

use std::fmt;

/// One step of testing a Node.js version, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Activate the version through the version manager
    SwitchVersion,
    /// Delete the local dependency directory
    ClearDependencies,
    /// Reinstall dependencies with the package manager
    InstallDependencies,
    /// Run the build script
    Build,
    /// Run the test script
    Test,
}

impl Step {
    /// All steps in execution order
    pub const ALL: [Step; 5] = [
        Step::SwitchVersion,
        Step::ClearDependencies,
        Step::InstallDependencies,
        Step::Build,
        Step::Test,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::SwitchVersion => write!(f, "switch version"),
            Step::ClearDependencies => write!(f, "clear dependencies"),
            Step::InstallDependencies => write!(f, "install dependencies"),
            Step::Build => write!(f, "build"),
            Step::Test => write!(f, "test"),
        }
    }
}

/// Why a phase stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// The step that failed
    pub step: Step,
    /// Exit code of the failing command, when it exited normally
    pub code: Option<i32>,
    /// Failure description
    pub message: String,
}

impl StepFailure {
    /// Creates a new StepFailure
    pub fn new(step: Step, code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            step,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.message)
    }
}

/// Result of testing one Node.js version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Every step succeeded
    Passed,
    /// A step failed and the remaining steps were not run
    Failed(StepFailure),
}

impl PhaseOutcome {
    /// Returns true if every step succeeded
    pub fn is_passed(&self) -> bool {
        matches!(self, PhaseOutcome::Passed)
    }

    /// Returns the failure, if any
    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            PhaseOutcome::Passed => None,
            PhaseOutcome::Failed(failure) => Some(failure),
        }
    }
}

impl From<Result<(), StepFailure>> for PhaseOutcome {
    fn from(result: Result<(), StepFailure>) -> Self {
        match result {
            Ok(()) => PhaseOutcome::Passed,
            Err(failure) => PhaseOutcome::Failed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(Step::ALL[0], Step::SwitchVersion);
        assert_eq!(Step::ALL[4], Step::Test);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::InstallDependencies.to_string(), "install dependencies");
        assert_eq!(Step::Build.to_string(), "build");
    }

    #[test]
    fn test_step_failure_display() {
        let failure = StepFailure::new(Step::Test, Some(1), "`npm run test` failed with exit code 1");
        assert_eq!(
            failure.to_string(),
            "test failed: `npm run test` failed with exit code 1"
        );
    }

    #[test]
    fn test_phase_outcome_from_result() {
        let passed: PhaseOutcome = Ok(()).into();
        assert!(passed.is_passed());
        assert!(passed.failure().is_none());

        let failed: PhaseOutcome = Err(StepFailure::new(Step::Build, Some(2), "boom")).into();
        assert!(!failed.is_passed());
        assert_eq!(failed.failure().unwrap().code, Some(2));
    }
}
