//! Centralized error handling for matchcast
//!
//! # Error Categories
//!
//! - **Source Errors**: transport failures and malformed payloads from the
//!   catalogue endpoints, the schedule feed and embed pages
//! - **Publish Errors**: failures writing an artifact to the content store
//! - **Configuration Errors**: unusable settings detected at startup
//!
//! # Usage
//!
//! ```rust
//! use matchcast::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
