//! Validated run configuration
//!
//! Built once from the parsed CLI arguments; everything downstream reads
//! this instead of the raw arguments.

use crate::cli::{CliArgs, LogLevel, PackageManagerKind, VersionManagerKind};
use crate::error::ConfigError;
use crate::version::TargetSpec;
use std::path::PathBuf;

/// Configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Project directory all commands run in
    pub project_dir: PathBuf,
    /// Package manager for install and scripts
    pub package_manager: PackageManagerKind,
    /// Version manager for install/switch
    pub version_manager: VersionManagerKind,
    /// Version to test
    pub target: TargetSpec,
    /// Build script, `None` when the build is skipped
    pub build_script: Option<String>,
    /// Test script
    pub test_script: String,
    /// Release index URL
    pub index_url: String,
    /// Log level
    pub log_level: LogLevel,
}

impl RunConfig {
    /// Create a configuration with defaults for everything but the manager
    pub fn new(project_dir: impl Into<PathBuf>, package_manager: PackageManagerKind) -> Self {
        Self {
            project_dir: project_dir.into(),
            package_manager,
            version_manager: VersionManagerKind::default(),
            target: TargetSpec::Latest,
            build_script: Some("build".to_string()),
            test_script: "test".to_string(),
            index_url: crate::release::NODE_DIST_INDEX_URL.to_string(),
            log_level: LogLevel::default(),
        }
    }

    /// Set the target
    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = target;
        self
    }

    /// Set the version manager
    pub fn with_version_manager(mut self, version_manager: VersionManagerKind) -> Self {
        self.version_manager = version_manager;
        self
    }

    /// Set or clear the build script
    pub fn with_build_script(mut self, script: Option<&str>) -> Self {
        self.build_script = script.map(str::to_string);
        self
    }

    /// Set the test script
    pub fn with_test_script(mut self, script: &str) -> Self {
        self.test_script = script.to_string();
        self
    }

    /// Validate CLI arguments into a configuration
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        if !args.path.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: args.path.clone(),
                message: "not a directory".to_string(),
            });
        }

        let target = args.target.parse::<TargetSpec>()?;

        if args.should_build() && args.build.trim().is_empty() {
            return Err(ConfigError::EmptyScript { option: "--build" });
        }
        if args.test.trim().is_empty() {
            return Err(ConfigError::EmptyScript { option: "--test" });
        }

        Ok(Self {
            project_dir: args.path.clone(),
            package_manager: args.manager,
            version_manager: args.version_manager,
            target,
            build_script: args.should_build().then(|| args.build.trim().to_string()),
            test_script: args.test.trim().to_string(),
            index_url: args.index_url.clone(),
            log_level: args.log,
        })
    }

    /// Whether debug output is enabled
    pub fn is_debug(&self) -> bool {
        self.log_level == LogLevel::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn args_for(dir: &TempDir, extra: &[&str]) -> CliArgs {
        let mut args = vec!["nodella", dir.path().to_str().unwrap(), "--manager", "npm"];
        args.extend(extra);
        CliArgs::parse_from(args)
    }

    #[test]
    fn test_from_cli_defaults() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_cli(&args_for(&dir, &[])).unwrap();

        assert_eq!(config.project_dir, dir.path());
        assert_eq!(config.package_manager, PackageManagerKind::Npm);
        assert_eq!(config.version_manager, VersionManagerKind::Nvm);
        assert_eq!(config.target, TargetSpec::Latest);
        assert_eq!(config.build_script.as_deref(), Some("build"));
        assert_eq!(config.test_script, "test");
        assert!(config.is_debug());
    }

    #[test]
    fn test_from_cli_no_build() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_cli(&args_for(&dir, &["--no-build"])).unwrap();
        assert_eq!(config.build_script, None);
    }

    #[test]
    fn test_from_cli_no_build_ignores_empty_build_name() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_cli(&args_for(&dir, &["--no-build", "--build", ""])).unwrap();
        assert_eq!(config.build_script, None);
    }

    #[test]
    fn test_from_cli_exact_target() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_cli(&args_for(&dir, &["--target", "v1.2.3"])).unwrap();
        assert_eq!(
            config.target,
            TargetSpec::Exact(semver::Version::parse("1.2.3").unwrap())
        );
    }

    #[test]
    fn test_from_cli_invalid_target() {
        let dir = TempDir::new().unwrap();
        let err = RunConfig::from_cli(&args_for(&dir, &["--target", "banana"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTarget { .. }));
    }

    #[test]
    fn test_from_cli_empty_test_script() {
        let dir = TempDir::new().unwrap();
        let err = RunConfig::from_cli(&args_for(&dir, &["--test", " "])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyScript { option: "--test" }));
    }

    #[test]
    fn test_from_cli_missing_directory() {
        let args = CliArgs::parse_from(["nodella", "/definitely/not/here", "--manager", "yarn"]);
        let err = RunConfig::from_cli(&args).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_builder_methods() {
        let config = RunConfig::new("/tmp/project", PackageManagerKind::Yarn)
            .with_target(TargetSpec::Lts)
            .with_version_manager(VersionManagerKind::Fnm)
            .with_build_script(None)
            .with_test_script("test:ci");
        assert_eq!(config.target, TargetSpec::Lts);
        assert_eq!(config.version_manager, VersionManagerKind::Fnm);
        assert_eq!(config.build_script, None);
        assert_eq!(config.test_script, "test:ci");
        assert_eq!(config.index_url, "https://nodejs.org/dist/index.json");
    }
}
