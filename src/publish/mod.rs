//! Publishing of generated documents
//!
//! A publisher is an upsert-by-path store: read the current revision of a
//! path (if any), then write new content against that revision. Each
//! artifact is published on its own so that one failure leaves the others
//! untouched.

pub mod github;
pub mod local;

pub use github::GithubPublisher;
pub use local::LocalPublisher;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::{PublishBackend, PublishConfig};
use crate::errors::AppResult;

/// A named document ready to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: String,
    pub content: String,
}

impl Artifact {
    pub fn new<P: Into<String>, C: Into<String>>(path: P, content: C) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait ContentPublisher: Send + Sync {
    /// Backend name for logs and reports
    fn name(&self) -> &'static str;

    /// Revision token of the stored document, `None` when it does not exist
    async fn get_current_revision(&self, path: &str) -> AppResult<Option<String>>;

    /// Write `content` at `path`, replacing the document at `revision`
    async fn put(
        &self,
        path: &str,
        content: &str,
        message: &str,
        revision: Option<&str>,
    ) -> AppResult<()>;
}

/// Outcome of publishing one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub path: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Commit message for a run started at `now`
pub fn commit_message(now: NaiveDateTime) -> String {
    format!("Update {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// Read the current revision, then write against it
pub async fn publish_artifact(
    publisher: &dyn ContentPublisher,
    artifact: &Artifact,
    message: &str,
) -> AppResult<()> {
    let revision = publisher.get_current_revision(&artifact.path).await?;
    publisher
        .put(&artifact.path, &artifact.content, message, revision.as_deref())
        .await
}

/// Publish every artifact in order; failures are reported, never propagated
pub async fn publish_artifacts(
    publisher: &dyn ContentPublisher,
    artifacts: &[Artifact],
    message: &str,
) -> Vec<PublishReport> {
    let mut reports = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let report = match publish_artifact(publisher, artifact, message).await {
            Ok(()) => {
                info!(
                    backend = publisher.name(),
                    path = %artifact.path,
                    bytes = artifact.content.len(),
                    "Published artifact"
                );
                PublishReport {
                    path: artifact.path.clone(),
                    success: true,
                    error: None,
                }
            }
            Err(e) => {
                error!(
                    backend = publisher.name(),
                    path = %artifact.path,
                    error = %e,
                    "Failed to publish artifact"
                );
                PublishReport {
                    path: artifact.path.clone(),
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    reports
}

/// Build the configured publisher
pub fn build_publisher(
    config: &PublishConfig,
    timeout: Duration,
) -> AppResult<Arc<dyn ContentPublisher>> {
    Ok(match config.backend {
        PublishBackend::Github => Arc::new(GithubPublisher::from_config(&config.github, timeout)?),
        PublishBackend::Local => Arc::new(LocalPublisher::new(&config.output_dir)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, PublishError};
    use std::sync::Mutex;

    /// Records writes and rejects one configured path
    struct RecordingPublisher {
        failing_path: &'static str,
        writes: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl ContentPublisher for RecordingPublisher {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn get_current_revision(&self, path: &str) -> AppResult<Option<String>> {
            Ok((path == "max.json").then(|| "rev-1".to_string()))
        }

        async fn put(
            &self,
            path: &str,
            _content: &str,
            _message: &str,
            revision: Option<&str>,
        ) -> AppResult<()> {
            if path == self.failing_path {
                return Err(AppError::from(PublishError::rejected(path, 422, "bad")));
            }
            self.writes
                .lock()
                .unwrap()
                .push((path.to_string(), revision.map(str::to_string)));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let publisher = RecordingPublisher {
            failing_path: "api.json",
            writes: Mutex::new(Vec::new()),
        };
        let artifacts = vec![
            Artifact::new("api.json", "{}"),
            Artifact::new("max.json", "[]"),
            Artifact::new("playlist.m3u", "#EXTM3U\n"),
        ];

        let reports = publish_artifacts(&publisher, &artifacts, "Update").await;

        assert_eq!(reports.len(), 3);
        assert!(!reports[0].success);
        assert!(reports[0].error.as_deref().unwrap().contains("422"));
        assert!(reports[1].success && reports[2].success);
        assert_eq!(
            *publisher.writes.lock().unwrap(),
            vec![
                ("max.json".to_string(), Some("rev-1".to_string())),
                ("playlist.m3u".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_commit_message() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 5, 3)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(commit_message(now), "Update 2025-05-03 09:05:07");
    }

    #[test]
    fn test_build_publisher_backends() {
        let dir = tempfile::tempdir().unwrap();
        let config = PublishConfig {
            output_dir: dir.path().to_path_buf(),
            ..PublishConfig::default()
        };
        let publisher = build_publisher(&config, Duration::from_secs(1)).unwrap();
        assert_eq!(publisher.name(), "local");

        let github = PublishConfig {
            backend: PublishBackend::Github,
            ..PublishConfig::default()
        };
        assert!(build_publisher(&github, Duration::from_secs(1)).is_err());
    }
}
