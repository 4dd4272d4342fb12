use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;

use crate::stats::{StatsResponse, WrappedData};

/// Client for the stats backend that serves pre-aggregated wrapped payloads.
#[derive(Clone)]
pub struct BackendClient {
    base_url: Arc<Url>,
    token: Arc<String>,
    http: Arc<Client>,
}

impl BackendClient {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid backend URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL cannot be used as a base: {base_url}");
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("github-wrapped/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: Arc::new(base_url),
            token: Arc::new(token.into()),
            http: Arc::new(http),
        })
    }

    /// `{base}/api/stats/{username}`, with the username as one encoded segment.
    pub fn stats_url(&self, username: &str) -> Result<Url> {
        // `.` and `..` would be resolved away instead of kept as a segment.
        if matches!(username, "" | "." | "..") {
            anyhow::bail!("Invalid username: {username:?}");
        }
        let mut url = (*self.base_url).clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Backend URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(["api", "stats", username]);
        Ok(url)
    }

    /// Fetch the wrapped payload for `username`.
    ///
    /// Every failure is logged and collapses to `None`, which the page treats
    /// the same as a user who never generated a report.
    pub async fn fetch_stats(&self, username: &str) -> Option<WrappedData> {
        match self.try_fetch_stats(username).await {
            Ok(Some(data)) => Some(data),
            Ok(None) => {
                tracing::info!(username = %username, "No stats data for user");
                None
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(username = %username, error = %error, "Error fetching stats");
                None
            }
        }
    }

    async fn try_fetch_stats(&self, username: &str) -> Result<Option<WrappedData>> {
        let url = self.stats_url(username)?;

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .context("Network error sending stats request")?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(username = %username, status = %status, "Stats backend returned non-success status");
            return Ok(None);
        }

        let parsed: StatsResponse = resp
            .json()
            .await
            .context("Failed to deserialize stats response")?;

        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(base, "secret", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn stats_url_appends_segments() {
        let url = client("http://backend.local").stats_url("octocat").unwrap();
        assert_eq!(url.as_str(), "http://backend.local/api/stats/octocat");

        let url = client("http://backend.local/prefix/").stats_url("octocat").unwrap();
        assert_eq!(url.as_str(), "http://backend.local/prefix/api/stats/octocat");
    }

    #[test]
    fn stats_url_encodes_username() {
        let url = client("http://backend.local").stats_url("a/b?c").unwrap();
        assert_eq!(url.as_str(), "http://backend.local/api/stats/a%2Fb%3Fc");
    }

    #[test]
    fn stats_url_rejects_dot_segments() {
        let c = client("http://backend.local");
        assert!(c.stats_url("").is_err());
        assert!(c.stats_url(".").is_err());
        assert!(c.stats_url("..").is_err());
        assert_eq!(
            c.stats_url("...").unwrap().as_str(),
            "http://backend.local/api/stats/..."
        );
        assert_eq!(
            c.stats_url("a.b").unwrap().as_str(),
            "http://backend.local/api/stats/a.b"
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(BackendClient::new("not a url", "t", Duration::from_secs(1)).is_err());
        assert!(BackendClient::new("mailto:me@example.com", "t", Duration::from_secs(1)).is_err());
    }
}
