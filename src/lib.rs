//! matchcast
//!
//! Collects live sports assets from catalogue APIs and a match schedule feed,
//! projects them into schedule, channel-list and M3U documents, and publishes
//! the documents to a content store.

pub mod config;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod output;
pub mod publish;
pub mod resolver;
pub mod schedule;
pub mod services;
pub mod utils;
pub mod web;
