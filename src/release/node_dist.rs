//! nodejs.org distribution index adapter
//!
//! Fetches the list of published Node.js releases.
//! API endpoint: https://nodejs.org/dist/index.json

use crate::error::ReleaseError;
use crate::release::{HttpClient, Release, ReleaseSource};
use async_trait::async_trait;

/// Official release index URL
pub const NODE_DIST_INDEX_URL: &str = "https://nodejs.org/dist/index.json";

/// Release index adapter for nodejs.org (or a mirror with the same layout)
pub struct NodeDistIndex {
    client: HttpClient,
    url: String,
}

impl NodeDistIndex {
    /// Create an adapter for the official index or a mirror
    pub fn with_url(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReleaseSource for NodeDistIndex {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch_releases(&self) -> Result<Vec<Release>, ReleaseError> {
        tracing::debug!("Fetching Node.js releases from {} ...", self.url);
        let entries: Vec<serde_json::Value> = self.client.get_json(&self.url).await?;
        let total = entries.len();

        let releases: Vec<Release> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Release>(entry) {
                Ok(release) => Some(release),
                Err(e) => {
                    tracing::debug!("Skipping malformed release entry: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Found {} releases ({} skipped)",
            releases.len(),
            total - releases.len()
        );
        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::test_server::serve_once;
    use crate::release::Lts;

    fn client() -> HttpClient {
        HttpClient::local(0)
    }

    #[test]
    fn test_default_url() {
        let index = NodeDistIndex::with_url(client(), NODE_DIST_INDEX_URL);
        assert_eq!(index.name(), "https://nodejs.org/dist/index.json");
    }

    #[tokio::test]
    async fn test_fetch_releases() {
        let url = serve_once(
            "200 OK",
            r#"[
                {"version":"v22.1.0","date":"2024-05-02","files":["linux-x64"],"lts":false,"security":false},
                {"version":"v20.13.0","date":"2024-05-07","files":["linux-x64"],"lts":"Iron","security":false}
            ]"#,
        )
        .await;

        let index = NodeDistIndex::with_url(client(), url);
        let releases = index.fetch_releases().await.unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].version, "v22.1.0");
        assert_eq!(releases[0].lts, Lts::Flag(false));
        assert_eq!(releases[1].lts, Lts::Codename("Iron".to_string()));
        assert!(releases[1].is_lts());
    }

    #[tokio::test]
    async fn test_fetch_releases_skips_malformed_entries() {
        let url = serve_once(
            "200 OK",
            r#"[
                {"version":"v22.1.0","date":"2024-05-02"},
                {"date":"2024-05-07"},
                {"version":"v20.13.0","date":"unknown"},
                {"version":"v20.12.2","lts":"Iron"}
            ]"#,
        )
        .await;

        let index = NodeDistIndex::with_url(client(), url);
        let releases = index.fetch_releases().await.unwrap();

        let versions: Vec<&str> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["v22.1.0", "v20.12.2"]);
    }

    #[tokio::test]
    async fn test_fetch_releases_malformed_body() {
        let url = serve_once("200 OK", r#"{"not":"a list"}"#).await;

        let index = NodeDistIndex::with_url(client(), url);
        let err = index.fetch_releases().await.unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_releases_server_error() {
        let url = serve_once("500 Internal Server Error", "").await;

        let index = NodeDistIndex::with_url(client(), url);
        let err = index.fetch_releases().await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }
}
