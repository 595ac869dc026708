pub mod catalogue;
pub mod schedule;

pub use catalogue::{
    CatalogueResponse, ExtractedAsset, RawContainer,
};
pub use schedule::{
    ChannelDescriptor, MatchRecord, ResolvedChannel, ScheduleBucket, ScheduleBuckets,
    ScheduleEntry, ScheduleFeed,
};
