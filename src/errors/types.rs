//! Error type definitions for matchcast
//!
//! This module defines the error types used throughout the application.
//! Errors only travel inside a pipeline stage; at a stage boundary they are
//! logged and turned into an empty or absent result.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Source handling errors (primary catalogue, schedule feed, embed pages)
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Publishing errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// External service errors
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source handling specific errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network connection timeouts
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Non-success HTTP status from an external source
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Parsing errors for source data
    #[error("Parse error: {source_type} - {message}")]
    ParseError { source_type: String, message: String },

    /// A field the record cannot do without is absent
    #[error("Missing field: {field}")]
    MissingField { field: String },
}

/// Publish collaborator errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// The remote store answered with a non-success status
    #[error("Publish rejected: {path} - {status} {message}")]
    Rejected {
        path: String,
        status: u16,
        message: String,
    },

    /// The revision token no longer matches the stored content
    #[error("Revision conflict: {path}")]
    Conflict { path: String },

    /// The remote store could not be reached
    #[error("Publish transport failure: {path} - {message}")]
    Transport { path: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an external service error
    pub fn external_service<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create an HTTP status error
    pub fn http<U: Into<String>>(status: u16, url: U) -> Self {
        Self::Http {
            status,
            url: url.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error<S: Into<String>, M: Into<String>>(source_type: S, message: M) -> Self {
        Self::ParseError {
            source_type: source_type.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field<F: Into<String>>(field: F) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl PublishError {
    /// Create a rejected error
    pub fn rejected<P: Into<String>, M: Into<String>>(path: P, status: u16, message: M) -> Self {
        Self::Rejected {
            path: path.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::Transport {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::from(SourceError::http(503, "https://feed.example/list"));
        assert_eq!(
            err.to_string(),
            "Source error: HTTP error: 503 - https://feed.example/list"
        );

        let err = AppError::from(PublishError::Conflict {
            path: "api.json".to_string(),
        });
        assert_eq!(err.to_string(), "Publish error: Revision conflict: api.json");
    }

    #[test]
    fn test_missing_field_display() {
        let err = AppError::from(SourceError::missing_field("matchDate"));
        assert_eq!(err.to_string(), "Source error: Missing field: matchDate");
    }
}
