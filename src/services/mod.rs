//! Service layer
//!
//! Each service owns one pipeline run end to end and is shared by the HTTP
//! handlers and the CLI.

pub mod collector;
pub mod schedule;

pub use collector::{CollectorService, RunSummary};
pub use schedule::{ScheduleOutcome, ScheduleRun, ScheduleService};
