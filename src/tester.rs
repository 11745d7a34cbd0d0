//! Upgrade tester: runs the test steps against one Node.js version
//!
//! Steps run in order and stop at the first failure:
//! switch version → clear dependencies → install → build (optional) → test

use crate::config::RunConfig;
use crate::domain::{PhaseOutcome, Step, StepFailure};
use crate::error::ProcessError;
use crate::package_manager::DEPENDENCY_DIR;
use crate::process::{CommandRunner, RunOptions};
use semver::Version;
use std::path::Path;

/// Runs the test steps for a version
pub struct UpgradeTester<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a RunConfig,
}

impl<'a> UpgradeTester<'a> {
    /// Create a tester over a runner and configuration
    pub fn new(runner: &'a dyn CommandRunner, config: &'a RunConfig) -> Self {
        Self { runner, config }
    }

    /// Steps this tester will run, in order
    pub fn steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| *step != Step::Build || self.config.build_script.is_some())
            .collect()
    }

    /// Run every step against `version`
    pub async fn test_version(&self, version: &Version) -> PhaseOutcome {
        tracing::info!("Testing Node.js v{} ...", version);
        self.run_steps(version).await.into()
    }

    async fn run_steps(&self, version: &Version) -> Result<(), StepFailure> {
        for step in self.steps() {
            if let Err(e) = self.run_step(step, version).await {
                tracing::warn!("Node.js v{}: {} failed", version, step);
                return Err(StepFailure::new(step, e.code(), e.to_string()));
            }
        }
        Ok(())
    }

    async fn run_step(&self, step: Step, version: &Version) -> Result<(), ProcessError> {
        let package_manager = self.config.package_manager;
        let version_manager = self.config.version_manager;

        let command = match step {
            Step::SwitchVersion => {
                tracing::debug!("Switching to Node.js v{} ...", version);
                version_manager.use_command(version)
            }
            Step::ClearDependencies => {
                clear_dependencies(self.runner.working_dir());
                return Ok(());
            }
            Step::InstallDependencies => {
                let install = package_manager.install_command();
                tracing::debug!("Installing dependencies with `{}` ...", install);
                version_manager.exec_command(version, &install)
            }
            Step::Build => {
                let Some(script) = self.config.build_script.as_deref() else {
                    return Ok(());
                };
                let build = package_manager.run_script_command(script);
                tracing::debug!("Building codebase with `{}` ...", build);
                version_manager.exec_command(version, &build)
            }
            Step::Test => {
                let test = package_manager.run_script_command(&self.config.test_script);
                tracing::debug!("Running tests with `{}` ...", test);
                version_manager.exec_command(version, &test)
            }
        };

        self.runner.run(&command, RunOptions::default()).await?;
        Ok(())
    }
}

/// Delete the dependency directory under `project_dir`.
///
/// Best-effort: failures are logged and ignored.
pub fn clear_dependencies(project_dir: &Path) {
    let dir = project_dir.join(DEPENDENCY_DIR);
    if !dir.exists() {
        return;
    }

    tracing::debug!("Deleting {} ...", DEPENDENCY_DIR);
    if let Err(e) = std::fs::remove_dir_all(&dir) {
        tracing::warn!("Could not delete {}: {}", dir.display(), e);
    }
}
