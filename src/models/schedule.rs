//! Schedule feed shapes and the bucketed schedule document

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::SourceError;

/// Root of the schedule feed response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFeed {
    #[serde(default)]
    pub matches: Option<Vec<Value>>,
}

/// One fixture from the schedule feed
#[derive(Debug, Clone, Default)]
pub struct MatchRecord {
    pub match_date: String,
    pub league: Option<String>,
    pub channels: Vec<ChannelDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct ChannelDescriptor {
    pub name: Option<String>,
    pub links: Option<Vec<Option<String>>>,
}

impl MatchRecord {
    /// Decode one raw match.
    ///
    /// Only `matchDate` is required. Optional fields of the wrong type read
    /// as absent and channels that are not objects are dropped on their own.
    pub fn decode(value: &Value) -> Result<Self, SourceError> {
        let match_date = value
            .get("matchDate")
            .and_then(Value::as_str)
            .ok_or_else(|| SourceError::missing_field("matchDate"))?;

        let channels = value
            .get("channels")
            .and_then(Value::as_array)
            .map(|raw| raw.iter().filter_map(ChannelDescriptor::decode).collect())
            .unwrap_or_default();

        Ok(Self {
            match_date: match_date.to_string(),
            league: value.get("league").and_then(Value::as_str).map(str::to_string),
            channels,
        })
    }

    pub fn event_label(&self) -> &str {
        self.league.as_deref().unwrap_or("")
    }

    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.channels
    }
}

impl ChannelDescriptor {
    /// Returns `None` for channels that are not JSON objects
    pub fn decode(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let links = fields.get("links").and_then(Value::as_array).map(|links| {
            links
                .iter()
                .map(|link| link.as_str().map(str::to_string))
                .collect()
        });

        Some(Self {
            name: fields.get("name").and_then(Value::as_str).map(str::to_string),
            links,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Channel")
    }

    /// The redirect link is the first entry of `links`
    pub fn redirect_link(&self) -> Option<&str> {
        self.links.as_ref()?.first()?.as_deref()
    }
}

/// A channel whose redirect link resolved to a playable URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedChannel {
    pub name: String,
    pub link: String,
    /// Reserved for downstream players, always empty here
    pub api: String,
    /// Reserved for downstream players, always `"0"` here
    pub scheme: String,
}

impl ResolvedChannel {
    pub fn new<N: Into<String>, L: Into<String>>(name: N, link: L) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            api: String::new(),
            scheme: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub time: String,
    pub event: String,
    pub channels: Vec<ResolvedChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBucket {
    pub key: String,
    pub entries: Vec<ScheduleEntry>,
}

/// Entries grouped by day label, in first-seen order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleBuckets {
    buckets: Vec<ScheduleBucket>,
}

impl ScheduleBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, creating its bucket on first use of the key
    pub fn push(&mut self, key: &str, entry: ScheduleEntry) {
        match self.buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.entries.push(entry),
            None => self.buckets.push(ScheduleBucket {
                key: key.to_string(),
                entries: vec![entry],
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[ScheduleEntry]> {
        self.buckets
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.entries.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleBucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of entries across all buckets
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }
}

impl Serialize for ScheduleBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.key, &bucket.entries)?;
        }
        map.end()
    }
}
