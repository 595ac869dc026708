//! Schedule run: feed → aggregated buckets → `s1.json`
//!
//! The resulting document is always published, including when the feed
//! failed, in which case it carries the failure.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, HeaderProfile};
use crate::errors::AppResult;
use crate::models::ScheduleBuckets;
use crate::publish::{
    Artifact, ContentPublisher, PublishReport, commit_message, publish_artifacts,
};
use crate::resolver::StreamResolver;
use crate::schedule::{FeedFailure, ScheduleAggregator, decode_matches, fetch_matches};
use crate::utils::HttpFetcher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScheduleOutcome {
    Schedule(ScheduleBuckets),
    Failed(FeedFailure),
}

impl ScheduleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Schedule(_))
    }

    pub fn to_document(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleRun {
    pub outcome: ScheduleOutcome,
    pub reports: Vec<PublishReport>,
}

pub struct ScheduleService {
    fetcher: Arc<dyn HttpFetcher>,
    profile: HeaderProfile,
    endpoint: String,
    output_file: String,
    aggregator: ScheduleAggregator,
    publisher: Arc<dyn ContentPublisher>,
}

impl ScheduleService {
    pub fn from_config(
        config: &Config,
        fetcher: Arc<dyn HttpFetcher>,
        publisher: Arc<dyn ContentPublisher>,
    ) -> AppResult<Self> {
        let resolver = StreamResolver::from_config(fetcher.clone(), &config.http, &config.schedule)?;
        Ok(Self {
            fetcher,
            profile: config.http.primary.clone(),
            endpoint: config.schedule.endpoint.clone(),
            output_file: config.schedule.output_file.clone(),
            aggregator: ScheduleAggregator::new(resolver, &config.output.label_suffix),
            publisher,
        })
    }

    /// Fetch and aggregate without publishing
    pub async fn build(&self) -> ScheduleOutcome {
        let raw = match fetch_matches(self.fetcher.as_ref(), &self.endpoint, &self.profile).await {
            Ok(raw) => raw,
            Err(failure) => return ScheduleOutcome::Failed(failure),
        };

        let matches = decode_matches(&raw);
        info!(count = matches.len(), "Formatting matches");
        ScheduleOutcome::Schedule(self.aggregator.aggregate(&matches).await)
    }

    pub async fn run(&self) -> AppResult<ScheduleRun> {
        let outcome = self.build().await;
        let artifact = Artifact::new(&self.output_file, outcome.to_document()?);
        let message = commit_message(Utc::now().naive_utc());
        let reports = publish_artifacts(self.publisher.as_ref(), &[artifact], &message).await;

        if let ScheduleOutcome::Schedule(buckets) = &outcome {
            info!(
                buckets = buckets.len(),
                entries = buckets.entry_count(),
                "Schedule run complete"
            );
        }
        Ok(ScheduleRun { outcome, reports })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, SourceError};
    use crate::publish::LocalPublisher;
    use async_trait::async_trait;
    use serde_json::json;
    use tempfile::TempDir;

    struct FeedFetcher {
        feed: Option<String>,
        embed: String,
    }

    #[async_trait]
    impl HttpFetcher for FeedFetcher {
        async fn fetch_text(&self, url: &str, _profile: &HeaderProfile) -> AppResult<String> {
            if url.contains("schedule") {
                self.feed
                    .clone()
                    .ok_or_else(|| AppError::Source(SourceError::timeout(url)))
            } else {
                Ok(self.embed.clone())
            }
        }
    }

    fn service(dir: &TempDir, feed: Option<serde_json::Value>) -> ScheduleService {
        let config = Config::default();
        let fetcher = Arc::new(FeedFetcher {
            feed: feed.map(|f| f.to_string()),
            embed: r#"var src = "https://cdn.example/live/index.m3u8?t=1";"#.to_string(),
        });
        let publisher = Arc::new(LocalPublisher::new(dir.path()));
        ScheduleService::from_config(&config, fetcher, publisher).unwrap()
    }

    #[tokio::test]
    async fn test_schedule_document_published() {
        let dir = TempDir::new().unwrap();
        let feed = json!({"matches": [{
            "matchDate": "2025-05-03T19:00:00.000Z",
            "league": "Premier League",
            "channels": [{"name": "Sky", "links": ["https://vuen.link/ch?id=9"]}]
        }]});
        let run = service(&dir, Some(feed)).run().await.unwrap();

        assert!(run.outcome.is_success());
        assert!(run.reports[0].success);
        let written: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("s1.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            written,
            json!({"Saturday 3th May - Schedule Time UK GMT": [{
                "time": "19:00",
                "event": "Premier League",
                "channels": [{
                    "name": "Sky",
                    "link": "https://cdn.example/live/index.m3u8?t=1",
                    "api": "",
                    "scheme": "0"
                }]
            }]})
        );
    }

    #[tokio::test]
    async fn test_feed_failure_is_published() {
        let dir = TempDir::new().unwrap();
        let run = service(&dir, Some(json!({"data": []}))).run().await.unwrap();

        assert_eq!(
            run.outcome,
            ScheduleOutcome::Failed(FeedFailure::new("No matches found in response"))
        );
        let written = std::fs::read_to_string(dir.path().join("s1.json")).unwrap();
        assert!(written.contains("No matches found in response"));
    }

    #[tokio::test]
    async fn test_unreachable_feed() {
        let dir = TempDir::new().unwrap();
        let outcome = service(&dir, None).build().await;
        match outcome {
            ScheduleOutcome::Failed(failure) => assert!(failure.error.starts_with("Request failed")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
