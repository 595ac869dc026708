//! Prioritized catalogue source selection
//!
//! Endpoints are tried in order and the first one that yields at least one
//! asset wins; later endpoints are never queried once a source succeeds.

use std::sync::Arc;
use tracing::{info, warn};

use super::tree_extractor::TreeExtractor;
use crate::config::HeaderProfile;
use crate::models::{CatalogueResponse, ExtractedAsset};
use crate::utils::{HttpFetcher, fetch_json};

/// Assets collected from the winning endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSelection {
    pub endpoint: String,
    pub assets: Vec<ExtractedAsset>,
}

pub struct CatalogueIngestor {
    fetcher: Arc<dyn HttpFetcher>,
    profile: HeaderProfile,
    extractor: TreeExtractor,
}

impl CatalogueIngestor {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, profile: HeaderProfile, extractor: TreeExtractor) -> Self {
        Self {
            fetcher,
            profile,
            extractor,
        }
    }

    /// Fetch one catalogue endpoint; transport and decode failures yield `None`
    pub async fn fetch_catalogue(&self, url: &str) -> Option<CatalogueResponse> {
        match fetch_json::<CatalogueResponse>(self.fetcher.as_ref(), url, &self.profile).await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!(url = %url, error = %e, "Catalogue request failed");
                None
            }
        }
    }

    /// Try each endpoint in order and stop at the first with assets
    pub async fn collect(&self, endpoints: &[String]) -> Option<SourceSelection> {
        for url in endpoints {
            info!(url = %url, "Checking catalogue endpoint");
            let Some(response) = self.fetch_catalogue(url).await else {
                continue;
            };

            let assets = self.extractor.extract(&response, url);
            if !assets.is_empty() {
                info!(url = %url, count = assets.len(), "Found items with asset keys");
                return Some(SourceSelection {
                    endpoint: url.clone(),
                    assets,
                });
            }
            info!(url = %url, "No qualifying items at endpoint");
        }

        warn!(endpoints = endpoints.len(), "No catalogue endpoint yielded assets");
        None
    }
}
