//! Schedule aggregation
//!
//! Groups matches under a day label and keeps only channels whose redirect
//! link resolved to a playable URL. Matches are processed strictly in
//! arrival order, one channel at a time.

use tracing::{debug, info, warn};

use crate::models::{MatchRecord, ResolvedChannel, ScheduleBuckets, ScheduleEntry};
use crate::resolver::StreamResolver;
use crate::utils::datetime::{bucket_key, parse_match_date};

pub struct ScheduleAggregator {
    resolver: StreamResolver,
    label_suffix: String,
}

impl ScheduleAggregator {
    pub fn new<S: Into<String>>(resolver: StreamResolver, label_suffix: S) -> Self {
        Self {
            resolver,
            label_suffix: label_suffix.into(),
        }
    }

    pub async fn aggregate(&self, matches: &[MatchRecord]) -> ScheduleBuckets {
        let mut buckets = ScheduleBuckets::new();

        for record in matches {
            let match_date = match parse_match_date(&record.match_date) {
                Ok(dt) => dt,
                Err(e) => {
                    warn!(error = %e, event = %record.event_label(), "Error processing match");
                    continue;
                }
            };
            let key = bucket_key(&match_date, &self.label_suffix);

            let channels = self.resolve_channels(record).await;
            if channels.is_empty() {
                debug!(event = %record.event_label(), "No playable channels, dropping match");
                continue;
            }

            buckets.push(
                &key,
                ScheduleEntry {
                    time: match_date.format("%H:%M").to_string(),
                    event: record.event_label().to_string(),
                    channels,
                },
            );
            info!(bucket = %key, event = %record.event_label(), "Added match");
        }

        buckets
    }

    /// Resolve the eligible channels of one match, in listed order
    pub async fn resolve_channels(&self, record: &MatchRecord) -> Vec<ResolvedChannel> {
        let mut resolved = Vec::new();

        for channel in record.channels() {
            let name = channel.display_name();
            let Some(link) = channel.redirect_link() else {
                continue;
            };
            if !self.resolver.is_eligible(link) {
                debug!(channel = %name, link = %link, "Skipping channel with foreign link");
                continue;
            }

            info!(channel = %name, link = %link, "Processing channel");
            match self.resolver.resolve(link, name).await {
                Some(url) => resolved.push(ResolvedChannel::new(name, url)),
                None => info!(channel = %name, "Skipping channel - no stream URL found"),
            }
        }

        resolved
    }
}
