//! Catalogue tree extraction
//!
//! Walks the container list of a catalogue response and flattens every leaf
//! that carries an asset key into an [`ExtractedAsset`]. Grouping containers
//! are searched exactly one level deep; anything nested further is not
//! visited.

use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::config::SourcesConfig;
use crate::models::{CatalogueResponse, ExtractedAsset, RawContainer};
use crate::utils::datetime::start_time_or_default;

const MISSING: &str = "N/A";

#[derive(Debug, Clone)]
pub struct TreeExtractor {
    leaf_layout: String,
    group_layout: String,
    tz: Tz,
}

impl TreeExtractor {
    pub fn new<L: Into<String>, G: Into<String>>(leaf_layout: L, group_layout: G, tz: Tz) -> Self {
        Self {
            leaf_layout: leaf_layout.into(),
            group_layout: group_layout.into(),
            tz,
        }
    }

    pub fn from_config(config: &SourcesConfig, tz: Tz) -> Self {
        Self::new(config.leaf_layout.clone(), config.group_layout.clone(), tz)
    }

    /// Extract every qualifying leaf, in container order
    pub fn extract(&self, response: &CatalogueResponse, source: &str) -> Vec<ExtractedAsset> {
        let mut assets = Vec::new();

        for node in response.containers() {
            let Some(container) = RawContainer::decode(node, source) else {
                continue;
            };

            if container.has_layout(&self.leaf_layout) {
                assets.extend(self.extract_container(&container));
            } else if container.has_layout(&self.group_layout) {
                for child in container.children() {
                    let Some(child) = RawContainer::decode(child, source) else {
                        continue;
                    };
                    if child.has_layout(&self.leaf_layout) {
                        assets.extend(self.extract_container(&child));
                    }
                }
            } else {
                trace!(layout = ?container.layout(), "Ignoring container layout");
            }
        }

        debug!(source = %source, count = assets.len(), "Extracted catalogue assets");
        assets
    }

    /// Flatten a single leaf container.
    ///
    /// Returns `None` when the asset key is absent or empty.
    pub fn extract_container(&self, container: &RawContainer<'_>) -> Option<ExtractedAsset> {
        let key = container.asset_key()?;

        Some(ExtractedAsset {
            title: container.title().unwrap_or(MISSING).to_string(),
            is_live: container.is_live(),
            audio_languages: container.audio_languages().unwrap_or(MISSING).to_string(),
            tv_background_image: container.tv_background_image().unwrap_or(MISSING).to_string(),
            dai_asset_key: key.to_string(),
            start_time: start_time_or_default(container.match_start_time(), &self.tz),
            source: container.source.to_string(),
        })
    }
}
