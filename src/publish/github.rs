//! GitHub contents API backend

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::ContentPublisher;
use crate::config::GithubConfig;
use crate::errors::{AppError, AppResult, PublishError};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

pub struct GithubPublisher {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: Option<String>,
    token: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    sha: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

impl GithubPublisher {
    pub fn from_config(config: &GithubConfig, timeout: Duration) -> AppResult<Self> {
        if config.owner.is_empty() || config.repo.is_empty() {
            return Err(AppError::configuration(
                "publish.github.owner and publish.github.repo are required",
            ));
        }
        let token = config.resolved_token().ok_or_else(|| {
            AppError::configuration("GitHub token missing: set GITHUB_TOKEN or publish.github.token")
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, self.user_agent.as_str())
    }
}

#[async_trait]
impl ContentPublisher for GithubPublisher {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_current_revision(&self, path: &str) -> AppResult<Option<String>> {
        let mut request = self.authorized(self.client.get(self.contents_url(path)));
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PublishError::transport(path, e.to_string()))?;

        if response.status() != StatusCode::OK {
            debug!(path = %path, status = %response.status(), "No current revision");
            return Ok(None);
        }

        let body: ContentsResponse = response
            .json()
            .await
            .map_err(|e| PublishError::transport(path, e.to_string()))?;
        Ok(body.sha)
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> AppResult<()> {
        let body = PutContentsRequest {
            message,
            content: STANDARD.encode(content.as_bytes()),
            sha: revision,
            branch: self.branch.as_deref(),
        };

        let response = self
            .authorized(self.client.put(self.contents_url(path)))
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::transport(path, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(PublishError::rejected(path, status.as_u16(), text).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn publisher(server: &MockServer, branch: Option<&str>) -> GithubPublisher {
        let config = GithubConfig {
            api_base: server.uri(),
            owner: "octo".to_string(),
            repo: "streams".to_string(),
            branch: branch.map(str::to_string),
            token: Some("test-token".to_string()),
            user_agent: "matchcast".to_string(),
        };
        let mut publisher = GithubPublisher::from_config(&config, Duration::from_secs(5)).unwrap();
        // keep the test independent of a GITHUB_TOKEN in the environment
        publisher.token = "test-token".to_string();
        publisher
    }

    #[tokio::test]
    async fn test_revision_from_existing_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/streams/contents/api.json"))
            .and(header("authorization", "token test-token"))
            .and(header("accept", GITHUB_ACCEPT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sha": "abc"})))
            .mount(&server)
            .await;

        let publisher = publisher(&server, None);
        assert_eq!(
            publisher.get_current_revision("api.json").await.unwrap(),
            Some("abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_file_has_no_revision() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let publisher = publisher(&server, None);
        assert_eq!(publisher.get_current_revision("max.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_sends_base64_content_and_branch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("ref", "main"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/repos/octo/streams/contents/playlist.m3u"))
            .and(body_json(json!({
                "message": "Update 2025-05-03 09:00:00",
                "content": "I0VYVE0zVQo=",
                "branch": "main"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = publisher(&server, Some("main"));
        let revision = publisher.get_current_revision("playlist.m3u").await.unwrap();
        publisher
            .put(
                "playlist.m3u",
                "#EXTM3U\n",
                "Update 2025-05-03 09:00:00",
                revision.as_deref(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_put_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(409).set_body_string("sha mismatch"))
            .mount(&server)
            .await;

        let publisher = publisher(&server, None);
        let err = publisher
            .put("api.json", "{}", "Update", Some("stale"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Publish(PublishError::Rejected { status: 409, .. })
        ));
        assert!(err.to_string().contains("sha mismatch"));
    }

    #[test]
    fn test_requires_repository() {
        let config = GithubConfig {
            token: Some("t".to_string()),
            ..GithubConfig::default()
        };
        assert!(GithubPublisher::from_config(&config, Duration::from_secs(1)).is_err());
    }
}
