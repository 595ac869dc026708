//! Catalogue collection run
//!
//! Selects the first catalogue endpoint with assets, projects the assets into
//! the three documents and publishes them.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Config, OutputConfig};
use crate::errors::AppResult;
use crate::ingestor::{CatalogueIngestor, TreeExtractor};
use crate::output::render_artifacts;
use crate::publish::{ContentPublisher, PublishReport, commit_message, publish_artifacts};
use crate::utils::HttpFetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    Success {
        assets_count: usize,
        endpoint: String,
        reports: Vec<PublishReport>,
    },
    /// No endpoint yielded a single asset; nothing was published
    NoAssets,
}

pub struct CollectorService {
    ingestor: CatalogueIngestor,
    endpoints: Vec<String>,
    output: OutputConfig,
    tz: Tz,
    publisher: Arc<dyn ContentPublisher>,
}

impl CollectorService {
    pub fn new(
        ingestor: CatalogueIngestor,
        endpoints: Vec<String>,
        output: OutputConfig,
        tz: Tz,
        publisher: Arc<dyn ContentPublisher>,
    ) -> Self {
        Self {
            ingestor,
            endpoints,
            output,
            tz,
            publisher,
        }
    }

    pub fn from_config(
        config: &Config,
        fetcher: Arc<dyn HttpFetcher>,
        publisher: Arc<dyn ContentPublisher>,
    ) -> AppResult<Self> {
        let tz = config.output.tz()?;
        let ingestor = CatalogueIngestor::new(
            fetcher,
            config.http.primary.clone(),
            TreeExtractor::from_config(&config.sources, tz),
        );
        Ok(Self::new(
            ingestor,
            config.sources.endpoints.clone(),
            config.output.clone(),
            tz,
            publisher,
        ))
    }

    pub async fn run_update(&self) -> AppResult<RunSummary> {
        self.run_update_at(Utc::now().with_timezone(&self.tz)).await
    }

    /// Run once with an explicit clock for the date label and commit message
    pub async fn run_update_at(&self, now: DateTime<Tz>) -> AppResult<RunSummary> {
        let Some(selection) = self.ingestor.collect(&self.endpoints).await else {
            warn!("No DAI assets found on any catalogue endpoint");
            return Ok(RunSummary::NoAssets);
        };

        let artifacts = render_artifacts(&selection.assets, now.date_naive(), &self.output)?;
        let message = commit_message(now.naive_local());
        let reports = publish_artifacts(self.publisher.as_ref(), &artifacts, &message).await;

        info!(
            endpoint = %selection.endpoint,
            count = selection.assets.len(),
            published = reports.iter().filter(|r| r.success).count(),
            "Update run complete"
        );

        Ok(RunSummary::Success {
            assets_count: selection.assets.len(),
            endpoint: selection.endpoint,
            reports,
        })
    }
}
