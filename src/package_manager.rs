//! Package manager integration
//!
//! This module provides:
//! - Install and script command lines for npm and yarn
//! - Lockfile-based detection of the manager a project uses

use crate::cli::PackageManagerKind;
use std::fmt;
use std::path::Path;

/// Directory the package managers install dependencies into
pub const DEPENDENCY_DIR: &str = "node_modules";

impl PackageManagerKind {
    /// Executable name
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
        }
    }

    /// Lockfile written by this manager
    pub fn lockfile(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "package-lock.json",
            PackageManagerKind::Yarn => "yarn.lock",
        }
    }

    /// Command that installs the project's dependencies
    pub fn install_command(&self) -> String {
        format!("{} install", self.binary())
    }

    /// Command that runs a package.json script
    pub fn run_script_command(&self, script: &str) -> String {
        format!("{} run {}", self.binary(), script)
    }

    /// Detect the manager a project uses from its lockfile
    pub fn detect(working_dir: &Path) -> Option<Self> {
        // yarn.lock takes precedence over package-lock.json
        if working_dir.join("yarn.lock").exists() {
            return Some(PackageManagerKind::Yarn);
        }
        if working_dir.join("package-lock.json").exists() {
            return Some(PackageManagerKind::Npm);
        }
        None
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command_npm() {
        assert_eq!(PackageManagerKind::Npm.install_command(), "npm install");
    }

    #[test]
    fn test_install_command_yarn() {
        assert_eq!(PackageManagerKind::Yarn.install_command(), "yarn install");
    }

    #[test]
    fn test_run_script_command() {
        assert_eq!(
            PackageManagerKind::Npm.run_script_command("build"),
            "npm run build"
        );
        assert_eq!(
            PackageManagerKind::Yarn.run_script_command("test:ci"),
            "yarn run test:ci"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(PackageManagerKind::Yarn.to_string(), "yarn");
    }

    #[test]
    fn test_detect_npm() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("package-lock.json"), "{}").unwrap();
        assert_eq!(
            PackageManagerKind::detect(temp_dir.path()),
            Some(PackageManagerKind::Npm)
        );
    }

    #[test]
    fn test_detect_yarn() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(
            PackageManagerKind::detect(temp_dir.path()),
            Some(PackageManagerKind::Yarn)
        );
    }

    #[test]
    fn test_detect_prefers_yarn_lock() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("yarn.lock"), "").unwrap();
        std::fs::write(temp_dir.path().join("package-lock.json"), "{}").unwrap();
        assert_eq!(
            PackageManagerKind::detect(temp_dir.path()),
            Some(PackageManagerKind::Yarn)
        );
    }

    #[test]
    fn test_detect_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
        assert_eq!(PackageManagerKind::detect(temp_dir.path()), None);
    }

    #[test]
    fn test_lockfile() {
        assert_eq!(PackageManagerKind::Npm.lockfile(), "package-lock.json");
        assert_eq!(PackageManagerKind::Yarn.lockfile(), "yarn.lock");
    }
}
