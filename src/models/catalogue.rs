//! Catalogue feed shapes and the normalized asset record
//!
//! The catalogue API returns a tree of containers whose shape varies from
//! tray to tray. Only the `layout` discriminator is relied upon; each node is
//! decoded on its own so that one malformed node drops only itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Root of a catalogue endpoint response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueResponse {
    #[serde(rename = "resultObj", default)]
    pub result_obj: Option<Value>,
}

impl CatalogueResponse {
    /// Top-level container nodes, empty when the list is absent
    pub fn containers(&self) -> &[Value] {
        self.result_obj
            .as_ref()
            .and_then(|r| r.get("containers"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A single node of the catalogue tree, tagged with the endpoint it was
/// fetched from.
///
/// Fields are read on access. A field of the wrong type reads as absent
/// instead of rejecting the node.
#[derive(Debug, Clone, Copy)]
pub struct RawContainer<'a> {
    node: &'a Value,
    pub source: &'a str,
}

impl<'a> RawContainer<'a> {
    /// Returns `None` for nodes that are not JSON objects
    pub fn decode(value: &'a Value, source: &'a str) -> Option<Self> {
        if !value.is_object() {
            debug!(source = %source, "Skipping non-object container");
            return None;
        }
        Some(Self {
            node: value,
            source,
        })
    }

    fn text(&self, pointer: &str) -> Option<&'a str> {
        self.node.pointer(pointer).and_then(Value::as_str)
    }

    pub fn layout(&self) -> Option<&'a str> {
        self.text("/layout")
    }

    pub fn has_layout(&self, layout: &str) -> bool {
        self.layout() == Some(layout)
    }

    /// Nested child nodes of a grouping container
    pub fn children(&self) -> &'a [Value] {
        self.node
            .pointer("/assets/containers")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Asset key, `None` when absent or empty
    pub fn asset_key(&self) -> Option<&'a str> {
        self.text("/metadata/emfAttributes/dai_asset_key")
            .filter(|key| !key.is_empty())
    }

    pub fn title(&self) -> Option<&'a str> {
        self.text("/metadata/title")
    }

    pub fn is_live(&self) -> bool {
        self.node
            .pointer("/metadata/isLive")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn audio_languages(&self) -> Option<&'a str> {
        self.text("/metadata/emfAttributes/audio_languages")
    }

    pub fn tv_background_image(&self) -> Option<&'a str> {
        self.text("/metadata/emfAttributes/tv_background_image")
    }

    /// Unix seconds, sent as either a number or a string
    pub fn match_start_time(&self) -> Option<&'a Value> {
        self.node.pointer("/metadata/emfAttributes/match_start_time")
    }
}

/// Flattened leaf record produced by the tree extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAsset {
    pub title: String,
    #[serde(rename = "isLive")]
    pub is_live: bool,
    pub audio_languages: String,
    pub tv_background_image: String,
    pub dai_asset_key: String,
    /// Wall-clock `HH:MM`, `00:00` when unknown
    pub start_time: String,
    #[serde(rename = "source_api")]
    pub source: String,
}

impl ExtractedAsset {
    /// Display name used by every output format: `"<title> - <language>"`
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.title, self.audio_languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_container_list_is_empty() {
        let response: CatalogueResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.containers().is_empty());

        let response: CatalogueResponse =
            serde_json::from_value(json!({"resultObj": {"total": 0}})).unwrap();
        assert!(response.containers().is_empty());

        let response: CatalogueResponse =
            serde_json::from_value(json!({"resultObj": {"containers": "none"}})).unwrap();
        assert!(response.containers().is_empty());
    }

    #[test]
    fn test_decode_tags_source() {
        let node = json!({
            "layout": "CONTENT_ITEM",
            "metadata": {"title": "Derby", "emfAttributes": {"dai_asset_key": "k1"}}
        });
        let container = RawContainer::decode(&node, "https://catalogue.example/a").unwrap();
        assert!(container.has_layout("CONTENT_ITEM"));
        assert_eq!(container.source, "https://catalogue.example/a");
        assert_eq!(container.asset_key(), Some("k1"));
        assert_eq!(container.title(), Some("Derby"));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(RawContainer::decode(&json!("CONTENT_ITEM"), "src").is_none());
        assert!(RawContainer::decode(&json!([1, 2]), "src").is_none());
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let node = json!({
            "layout": 7,
            "metadata": {
                "title": {"en": "Derby"},
                "isLive": "true",
                "emfAttributes": {"dai_asset_key": "k1", "audio_languages": ["EN", "HI"]}
            },
            "assets": {"containers": {"0": {}}}
        });
        let container = RawContainer::decode(&node, "src").unwrap();
        assert_eq!(container.layout(), None);
        assert_eq!(container.title(), None);
        assert!(!container.is_live());
        assert_eq!(container.audio_languages(), None);
        assert!(container.children().is_empty());
        assert_eq!(container.asset_key(), Some("k1"));
    }

    #[test]
    fn test_asset_serializes_with_feed_field_names() {
        let asset = ExtractedAsset {
            title: "X".to_string(),
            is_live: true,
            audio_languages: "EN".to_string(),
            tv_background_image: "N/A".to_string(),
            dai_asset_key: "abc123".to_string(),
            start_time: "00:00".to_string(),
            source: "N/A".to_string(),
        };
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["isLive"], true);
        assert_eq!(value["source_api"], "N/A");
        assert_eq!(asset.display_name(), "X - EN");
    }
}
