//! Node.js release index
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Release descriptor types as published in `index.json`
//! - nodejs.org index adapter

mod client;
mod node_dist;
#[cfg(test)]
mod test_server;

pub use client::HttpClient;
pub use node_dist::{NodeDistIndex, NODE_DIST_INDEX_URL};

use crate::error::ReleaseError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trait for release index sources
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Human readable name of the source (used in logs)
    fn name(&self) -> &str;

    /// Fetch every published release, in index order
    async fn fetch_releases(&self) -> Result<Vec<Release>, ReleaseError>;
}

/// LTS marker: `false` for current releases, a codename for LTS lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lts {
    Codename(String),
    Flag(bool),
}

impl Default for Lts {
    fn default() -> Self {
        Lts::Flag(false)
    }
}

/// One entry of the release index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version as published, e.g. "v20.13.0"
    pub version: String,
    /// Release date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// LTS marker
    #[serde(default)]
    pub lts: Lts,
}

impl Release {
    /// Create a non-LTS release
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: None,
            lts: Lts::default(),
        }
    }

    /// Mark this release as part of an LTS line
    pub fn with_lts(mut self, codename: impl Into<String>) -> Self {
        self.lts = Lts::Codename(codename.into());
        self
    }

    /// Whether this release belongs to an LTS line
    pub fn is_lts(&self) -> bool {
        match &self.lts {
            Lts::Codename(_) => true,
            Lts::Flag(flag) => *flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_deserialize_minimal() {
        let release: Release = serde_json::from_str(r#"{"version":"v10.0.0"}"#).unwrap();
        assert_eq!(release, Release::new("v10.0.0"));
        assert!(!release.is_lts());
    }

    #[test]
    fn test_release_deserialize_full() {
        let release: Release = serde_json::from_str(
            r#"{"version":"v18.20.2","date":"2024-04-10","files":[],"npm":"10.5.0","lts":"Hydrogen"}"#,
        )
        .unwrap();
        assert_eq!(release.date, NaiveDate::from_ymd_opt(2024, 4, 10));
        assert_eq!(release.lts, Lts::Codename("Hydrogen".to_string()));
        assert!(release.is_lts());
    }

    #[test]
    fn test_release_lts_flag_true() {
        let release: Release =
            serde_json::from_str(r#"{"version":"v4.2.0","lts":true}"#).unwrap();
        assert!(release.is_lts());
    }

    #[test]
    fn test_release_missing_version_is_rejected() {
        let result: Result<Release, _> = serde_json::from_str(r#"{"date":"2024-04-10"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_lts() {
        let release = Release::new("v20.13.0").with_lts("Iron");
        assert!(release.is_lts());
    }
}
