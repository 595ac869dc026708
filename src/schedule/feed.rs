//! Schedule feed retrieval
//!
//! Feed failures are not raised: they become a [`FeedFailure`] document
//! that is published in place of the schedule.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::HeaderProfile;
use crate::errors::{AppError, SourceError};
use crate::models::{MatchRecord, ScheduleFeed};
use crate::utils::{HttpFetcher, fetch_json};

/// Structured error result for a feed that could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFailure {
    pub error: String,
}

impl FeedFailure {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Fetch the feed and return its raw match list
pub async fn fetch_matches(
    fetcher: &dyn HttpFetcher,
    url: &str,
    profile: &HeaderProfile,
) -> Result<Vec<Value>, FeedFailure> {
    info!(url = %url, "Fetching schedule feed");
    let feed: ScheduleFeed = match fetch_json(fetcher, url, profile).await {
        Ok(feed) => feed,
        Err(AppError::Source(SourceError::ParseError { message, .. })) => {
            warn!(url = %url, error = %message, "Invalid JSON response from schedule feed");
            return Err(FeedFailure::new("Invalid JSON response"));
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Schedule feed request failed");
            return Err(FeedFailure::new(format!("Request failed: {e}")));
        }
    };

    match feed.matches {
        Some(matches) => {
            info!(count = matches.len(), "Schedule feed request successful");
            Ok(matches)
        }
        None => {
            warn!(url = %url, "Schedule feed has no matches field");
            Err(FeedFailure::new("No matches found in response"))
        }
    }
}

/// Decode raw matches, dropping the ones missing required fields
pub fn decode_matches(raw: &[Value]) -> Vec<MatchRecord> {
    raw.iter()
        .filter_map(|value| match MatchRecord::decode(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Error processing match");
                None
            }
        })
        .collect()
}
