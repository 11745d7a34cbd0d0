//! Node.js version resolution
//!
//! This module provides:
//! - Canonical cleaning of version text ("v1.2.3" → 1.2.3)
//! - Target specifications (latest, lts, major line, minor line, exact)
//! - Release selection from the release index
//! - Current/target resolution against a command runner and release source

use crate::error::{AppError, ConfigError, ReleaseError, VersionError};
use crate::process::{CommandRunner, RunOptions};
use crate::release::{Release, ReleaseSource};
use regex::Regex;
use semver::Version;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Command that reports the active Node.js version
pub const CURRENT_VERSION_COMMAND: &str = "node -v";

static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)").unwrap()
});

/// Clean version text into a canonical semantic version.
///
/// Surrounding whitespace and leading `=`/`v` characters are ignored.
pub fn clean_version(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim().trim_start_matches(['=', 'v', 'V']).trim();
    Version::parse(trimmed).map_err(|e| VersionError::invalid(input.trim(), e.to_string()))
}

/// Read a version out of command output.
///
/// Tries the whole output first, then falls back to the last version-looking
/// token (version managers sometimes print banners around it).
pub fn parse_version_output(command: &str, output: &str) -> Result<Version, VersionError> {
    if let Ok(version) = clean_version(output) {
        return Ok(version);
    }

    VERSION_TOKEN
        .captures_iter(output)
        .filter_map(|caps| Version::parse(&caps[1]).ok())
        .last()
        .ok_or_else(|| VersionError::not_found(command, output.trim()))
}

/// Which version to test against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// Greatest published release
    Latest,
    /// Greatest published LTS release
    Lts,
    /// Greatest release of a major line
    Major(u64),
    /// Greatest release of a minor line (`20.1` → greatest `20.1.x`)
    Minor(u64, u64),
    /// A literal version
    Exact(Version),
}

impl TargetSpec {
    /// Whether resolving this spec needs the release index
    pub fn needs_index(&self) -> bool {
        !matches!(self, TargetSpec::Exact(_))
    }

    /// Whether a release is a candidate for this spec
    fn accepts(&self, release: &Release, version: &Version) -> bool {
        match self {
            TargetSpec::Latest => true,
            TargetSpec::Lts => release.is_lts(),
            TargetSpec::Major(major) => version.major == *major,
            TargetSpec::Minor(major, minor) => {
                version.major == *major && version.minor == *minor
            }
            TargetSpec::Exact(exact) => version == exact,
        }
    }
}

impl FromStr for TargetSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let lower = value.to_ascii_lowercase();

        match lower.as_str() {
            "latest" | "current" | "node" => return Ok(TargetSpec::Latest),
            "lts" | "lts/*" => return Ok(TargetSpec::Lts),
            _ => {}
        }

        let bare = lower.trim_start_matches('v');
        let parts: Vec<&str> = bare.split('.').collect();
        let numeric = parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if numeric {
            match parts.as_slice() {
                [major] => {
                    if let Ok(major) = major.parse() {
                        return Ok(TargetSpec::Major(major));
                    }
                }
                [major, minor] => {
                    if let (Ok(major), Ok(minor)) = (major.parse(), minor.parse()) {
                        return Ok(TargetSpec::Minor(major, minor));
                    }
                }
                _ => {}
            }
        }

        clean_version(value)
            .map(TargetSpec::Exact)
            .map_err(|_| ConfigError::InvalidTarget {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Latest => write!(f, "latest"),
            TargetSpec::Lts => write!(f, "lts"),
            TargetSpec::Major(major) => write!(f, "{}.x", major),
            TargetSpec::Minor(major, minor) => write!(f, "{}.{}.x", major, minor),
            TargetSpec::Exact(version) => write!(f, "{}", version),
        }
    }
}

/// Pick the greatest release accepted by `spec`.
///
/// Equal versions keep the earliest entry in list order. Entries whose
/// version cannot be parsed are skipped.
pub fn select_release<'a>(
    releases: &'a [Release],
    spec: &TargetSpec,
) -> Option<(&'a Release, Version)> {
    let mut best: Option<(&Release, Version)> = None;

    for release in releases {
        let version = match clean_version(&release.version) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Skipping release entry: {}", e);
                continue;
            }
        };

        if !spec.accepts(release, &version) {
            continue;
        }

        let is_better = best
            .as_ref()
            .is_none_or(|(_, current_best)| version > *current_best);
        if is_better {
            best = Some((release, version));
        }
    }

    best
}

/// The version in use and the version to test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
    pub current: Version,
    pub target: Version,
}

impl VersionPair {
    pub fn new(current: Version, target: Version) -> Self {
        Self { current, target }
    }

    /// Nothing to test when the target is already in use
    pub fn is_same(&self) -> bool {
        self.current == self.target
    }
}

/// Query the active Node.js version
pub async fn current_version(runner: &dyn CommandRunner) -> Result<Version, AppError> {
    let output = runner
        .run(CURRENT_VERSION_COMMAND, RunOptions::suppressed())
        .await?;
    Ok(parse_version_output(CURRENT_VERSION_COMMAND, &output)?)
}

/// Resolve a target specification to a concrete version.
///
/// Exact versions are returned without touching the release index.
pub async fn resolve_target(
    spec: &TargetSpec,
    source: &dyn ReleaseSource,
) -> Result<Version, AppError> {
    if let TargetSpec::Exact(version) = spec {
        return Ok(version.clone());
    }

    let releases = source.fetch_releases().await?;
    if releases.is_empty() {
        return Err(ReleaseError::invalid_response(source.name(), "release index is empty").into());
    }

    let (release, version) = select_release(&releases, spec)
        .ok_or_else(|| ReleaseError::no_matching_release(spec.to_string()))?;

    match release.date {
        Some(date) => tracing::debug!("Resolved {} to v{} (released {})", spec, version, date),
        None => tracing::debug!("Resolved {} to v{}", spec, version),
    }

    Ok(version)
}
