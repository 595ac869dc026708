//! Grouped schedule document (`api.json`)

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::stream_link;
use crate::config::OutputConfig;
use crate::models::{ExtractedAsset, ResolvedChannel};
use crate::utils::datetime::date_label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedEntry {
    pub time: String,
    pub event: String,
    pub channels: Vec<ResolvedChannel>,
    /// Secondary channel list, always empty for catalogue assets
    pub channels2: Vec<ResolvedChannel>,
}

/// `{ "<date label>": { "<category>": [entries] } }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedSchedule {
    pub label: String,
    pub category: String,
    pub entries: Vec<GroupedEntry>,
}

impl Serialize for GroupedSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut categories = std::collections::BTreeMap::new();
        categories.insert(self.category.as_str(), &self.entries);

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &categories)?;
        map.end()
    }
}

pub fn project_grouped(
    assets: &[ExtractedAsset],
    today: NaiveDate,
    config: &OutputConfig,
) -> GroupedSchedule {
    let entries = assets
        .iter()
        .map(|asset| GroupedEntry {
            time: asset.start_time.clone(),
            event: asset.display_name(),
            channels: vec![ResolvedChannel::new(
                &config.channel_name,
                stream_link(&config.link_template, &asset.dai_asset_key),
            )],
            channels2: Vec::new(),
        })
        .collect();

    GroupedSchedule {
        label: date_label(today, &config.date_format, &config.label_suffix),
        category: config.category.clone(),
        entries,
    }
}
