//! Run orchestrator for coordinating the whole upgrade test
//!
//! This module provides:
//! - Workflow coordination: current → resolve → compare → install → upgrade → reversion
//! - Lockfile sanity check against the chosen package manager
//! - Injection points for mock runners and release sources

use crate::cli::PackageManagerKind;
use crate::config::RunConfig;
use crate::domain::RunSummary;
use crate::error::AppError;
use crate::process::{CommandRunner, RunOptions, ShellRunner};
use crate::progress::Progress;
use crate::release::{HttpClient, NodeDistIndex, ReleaseSource};
use crate::tester::UpgradeTester;
use crate::version::{current_version, resolve_target, TargetSpec, VersionPair};
use std::sync::Arc;
use std::time::Instant;

/// Result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The current version already is the target; nothing was tested
    AlreadyOnTarget(VersionPair),
    /// Both phases ran
    Tested(RunSummary),
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::AlreadyOnTarget(_) => 0,
            RunOutcome::Tested(summary) => summary.exit_code(),
        }
    }
}

/// Orchestrator for the upgrade test workflow
pub struct Orchestrator {
    /// Run configuration
    config: RunConfig,
    /// Runner for every shell command
    runner: Arc<dyn CommandRunner>,
    /// Source of Node.js releases
    source: Box<dyn ReleaseSource>,
}

impl Orchestrator {
    /// Create an orchestrator that runs real commands and queries the release index
    pub fn new(config: RunConfig) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        let source = NodeDistIndex::with_url(client, config.index_url.clone());
        let runner = ShellRunner::new(config.project_dir.clone());

        Ok(Self::with_parts(config, Arc::new(runner), Box::new(source)))
    }

    /// Create an orchestrator with custom parts (for testing)
    pub fn with_parts(
        config: RunConfig,
        runner: Arc<dyn CommandRunner>,
        source: Box<dyn ReleaseSource>,
    ) -> Self {
        Self {
            config,
            runner,
            source,
        }
    }

    /// Run the workflow
    pub async fn run(&self) -> Result<RunOutcome, AppError> {
        let timer = Instant::now();

        let current = current_version(self.runner.as_ref()).await?;
        let target = self.resolve().await?;
        let versions = VersionPair::new(current, target);

        let label = self.target_label();
        tracing::info!("Current Node.js version is v{}", versions.current);
        tracing::info!("{} Node.js version is v{}", capitalize(label), versions.target);

        if versions.is_same() {
            tracing::info!(
                "Already using {} Node.js version (v{})",
                label,
                versions.target
            );
            return Ok(RunOutcome::AlreadyOnTarget(versions));
        }

        self.check_lockfile();

        let version_manager = self.config.version_manager;
        tracing::info!("Installing Node.js v{} with {} ...", versions.target, version_manager);
        self.runner
            .run(
                &version_manager.install_command(&versions.target),
                RunOptions::default(),
            )
            .await?;

        let tester = UpgradeTester::new(self.runner.as_ref(), &self.config);
        let upgrade = tester.test_version(&versions.target).await;
        let reversion = tester.test_version(&versions.current).await;

        Ok(RunOutcome::Tested(RunSummary::new(
            versions,
            upgrade,
            reversion,
            timer.elapsed(),
        )))
    }

    async fn resolve(&self) -> Result<semver::Version, AppError> {
        let show_progress = self.config.target.needs_index() && !self.config.is_debug();
        let mut progress = Progress::new(show_progress);
        progress.spinner(&format!("Fetching Node.js releases from {}", self.source.name()));
        let result = resolve_target(&self.config.target, self.source.as_ref()).await;
        progress.finish_and_clear();
        result
    }

    fn target_label(&self) -> &'static str {
        match self.config.target {
            TargetSpec::Latest => "latest",
            _ => "target",
        }
    }

    /// Warn when the project's lockfile belongs to another package manager
    fn check_lockfile(&self) {
        let chosen = self.config.package_manager;
        match PackageManagerKind::detect(&self.config.project_dir) {
            Some(detected) if detected != chosen => tracing::warn!(
                "Found {} but testing with {}",
                detected.lockfile(),
                chosen
            ),
            _ => {}
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
