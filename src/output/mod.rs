//! Format projectors
//!
//! Pure, infallible mappings from extracted assets to the three published
//! representations. Rendering to bytes happens in [`render_artifacts`].

pub mod flat;
pub mod grouped;
pub mod playlist;

pub use flat::{FlatEntry, project_flat};
pub use grouped::{GroupedEntry, GroupedSchedule, project_grouped};
pub use playlist::project_playlist;

use chrono::NaiveDate;

use crate::config::OutputConfig;
use crate::errors::AppResult;
use crate::models::ExtractedAsset;
use crate::publish::Artifact;
use crate::utils::fill_template;

/// Playable stream URL for an asset key
pub fn stream_link(template: &str, asset_key: &str) -> String {
    fill_template(template, "key", asset_key)
}

/// Project the assets into the three named documents, in publish order
pub fn render_artifacts(
    assets: &[ExtractedAsset],
    today: NaiveDate,
    config: &OutputConfig,
) -> AppResult<Vec<Artifact>> {
    let grouped = project_grouped(assets, today, config);
    let flat = project_flat(assets, config);

    Ok(vec![
        Artifact::new(
            &config.schedule_file,
            serde_json::to_string_pretty(&grouped)?,
        ),
        Artifact::new(
            &config.channel_list_file,
            serde_json::to_string_pretty(&flat)?,
        ),
        Artifact::new(&config.playlist_file, project_playlist(assets, config)),
    ])
}
