//! Web layer module
//!
//! HTTP trigger surface for the collection and schedule runs. Handlers are
//! thin and delegate to the service layer.

use anyhow::Result;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::services::{CollectorService, ScheduleService};

pub mod handlers;
pub mod responses;

pub use responses::{HealthResponse, UpdateResponse, handle_error};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, state: AppState) -> Result<Self> {
        let app = Self::create_router(state);
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health_check))
            .route("/update", get(handlers::update))
            .route("/schedule", get(handlers::schedule))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<CollectorService>,
    pub schedule: Arc<ScheduleService>,
}

impl AppState {
    pub fn new(collector: CollectorService, schedule: ScheduleService) -> Self {
        Self {
            collector: Arc::new(collector),
            schedule: Arc::new(schedule),
        }
    }
}
