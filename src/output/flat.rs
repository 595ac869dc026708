//! Flat channel list (`max.json`)

use serde::Serialize;

use super::stream_link;
use crate::config::OutputConfig;
use crate::models::ExtractedAsset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub logo: String,
    pub name: String,
    pub link: String,
}

pub fn project_flat(assets: &[ExtractedAsset], config: &OutputConfig) -> Vec<FlatEntry> {
    assets
        .iter()
        .map(|asset| FlatEntry {
            logo: asset.tv_background_image.clone(),
            name: asset.display_name(),
            link: stream_link(&config.link_template, &asset.dai_asset_key),
        })
        .collect()
}
