//! Utility modules for matchcast
//!
//! - `datetime` for start-time and day-label formatting
//! - `http_client` for the outbound fetch seam and its reqwest implementation

pub mod datetime;
pub mod http_client;

pub use http_client::{HttpFetcher, StandardHttpClient, fetch_json};

/// Replace a `{name}` placeholder in a URL template
pub fn fill_template(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{placeholder}}}"), value)
}
