//! HTTP response types and utilities
//!
//! Response bodies keep the field names external consumers of the update
//! trigger already rely on (`status`, `message`, `assets_count`).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, PublishError};

/// Outcome of an update run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_count: Option<usize>,
}

impl UpdateResponse {
    pub fn success(assets_count: usize) -> Self {
        Self {
            status: "success".to_string(),
            message: "Files updated successfully".to_string(),
            assets_count: Some(assets_count),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            assets_count: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::Configuration { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Configuration error: {}", message),
        ),
        AppError::ExternalService { service, message } => (
            StatusCode::BAD_GATEWAY,
            format!("External service error ({}): {}", service, message),
        ),
        AppError::Http(_) => (
            StatusCode::BAD_GATEWAY,
            "External service communication failed".to_string(),
        ),
        AppError::Source(_) => (
            StatusCode::BAD_GATEWAY,
            "Source operation failed".to_string(),
        ),
        AppError::Publish(PublishError::Conflict { path }) => (
            StatusCode::CONFLICT,
            format!("Revision conflict on {}", path),
        ),
        AppError::Publish(_) => (StatusCode::BAD_GATEWAY, error.to_string()),
        AppError::Json(_) | AppError::Io(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", error),
        ),
    };

    (status, Json(UpdateResponse::error(message))).into_response()
}
