//! HTTP request handlers
//!
//! Handlers stay thin: each one triggers a service run and maps the outcome
//! to a status code.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use super::AppState;
use super::responses::{HealthResponse, UpdateResponse, handle_error};
use crate::services::{RunSummary, ScheduleOutcome};

pub async fn index() -> &'static str {
    "SonyLIV DAI Asset Collector is running!"
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// Run one catalogue collection and publish the three documents
pub async fn update(State(state): State<AppState>) -> Response {
    info!("Update triggered over HTTP");
    match state.collector.run_update().await {
        Ok(RunSummary::Success { assets_count, .. }) => {
            (StatusCode::OK, Json(UpdateResponse::success(assets_count))).into_response()
        }
        Ok(RunSummary::NoAssets) => (
            StatusCode::BAD_REQUEST,
            Json(UpdateResponse::error("No DAI assets found")),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "Update run failed");
            handle_error(e)
        }
    }
}

/// Run the schedule pipeline and return the published document
pub async fn schedule(State(state): State<AppState>) -> Response {
    info!("Schedule run triggered over HTTP");
    let run = match state.schedule.run().await {
        Ok(run) => run,
        Err(e) => {
            warn!(error = %e, "Schedule run failed");
            return handle_error(e);
        }
    };

    match run.outcome {
        ScheduleOutcome::Schedule(buckets) => (StatusCode::OK, Json(buckets)).into_response(),
        ScheduleOutcome::Failed(failure) => (StatusCode::BAD_GATEWAY, Json(failure)).into_response(),
    }
}
