//! Schedule feed ingestion and day-bucket aggregation

pub mod aggregator;
pub mod feed;

pub use aggregator::ScheduleAggregator;
pub use feed::{FeedFailure, decode_matches, fetch_matches};
