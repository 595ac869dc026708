use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{REFERER, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::HeaderProfile;
use crate::errors::{AppError, AppResult, SourceError};

/// Outbound fetch seam used by every pipeline stage
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET the URL with the given header profile and return the body as text.
    ///
    /// Non-2xx responses are errors.
    async fn fetch_text(&self, url: &str, profile: &HeaderProfile) -> AppResult<String>;
}

/// Fetch a URL and decode the body as JSON
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn HttpFetcher,
    url: &str,
    profile: &HeaderProfile,
) -> AppResult<T> {
    let body = fetcher.fetch_text(url, profile).await?;
    serde_json::from_str(&body).map_err(|e| {
        AppError::Source(SourceError::parse_error(
            "json",
            format!("Failed to parse JSON from {url}: {e}"),
        ))
    })
}

/// Default implementation of HttpFetcher using reqwest
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with a total request timeout
    pub fn with_timeout(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for StandardHttpClient {
    async fn fetch_text(&self, url: &str, profile: &HeaderProfile) -> AppResult<String> {
        debug!(url = %url, user_agent = %profile.user_agent, "Fetching text content");

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, profile.user_agent.as_str());
        if let Some(referer) = &profile.referer {
            request = request.header(REFERER, referer.as_str());
        }
        for (name, value) in &profile.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Source(SourceError::timeout(url))
            } else {
                AppError::external_service("http_client", e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Source(SourceError::http(status.as_u16(), url)));
        }

        let content = response.text().await?;
        debug!(url = %url, bytes = content.len(), "Fetched text content");
        Ok(content)
    }
}
