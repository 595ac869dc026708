use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use matchcast::config::Config;
use matchcast::publish::LocalPublisher;
use matchcast::services::{CollectorService, ScheduleService};
use matchcast::utils::StandardHttpClient;
use matchcast::web::{AppState, WebServer};

// Helper function to send requests to the app
async fn send_request(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body_bytes.to_vec())
}

async fn send_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send_request(app, Method::GET, uri).await;
    let json = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

fn app(server: &MockServer, output: &TempDir) -> Router {
    let mut config = Config::default();
    config.sources.endpoints = vec![format!("{}/catalogue", server.uri())];
    config.schedule.endpoint = format!("{}/schedule/list", server.uri());
    config.publish.output_dir = output.path().to_path_buf();

    let fetcher = Arc::new(StandardHttpClient::with_timeout(Duration::from_secs(5)).unwrap());
    let publisher = Arc::new(LocalPublisher::new(output.path()));
    let state = AppState::new(
        CollectorService::from_config(&config, fetcher.clone(), publisher.clone()).unwrap(),
        ScheduleService::from_config(&config, fetcher, publisher).unwrap(),
    );
    WebServer::create_router(state)
}

#[tokio::test]
async fn test_index_and_health() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    let app = app(&server, &output);

    let (status, body) = send_request(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().ends_with("is running!"));

    let (status, response) = send_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert!(response.get("timestamp").is_some());
}

#[tokio::test]
async fn test_update_reports_asset_count() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/catalogue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultObj": {"containers": [
                {"layout": "CONTENT_ITEM", "metadata": {"title": "A", "emfAttributes": {"dai_asset_key": "a"}}},
                {"layout": "CONTENT_ITEM", "metadata": {"title": "B", "emfAttributes": {"dai_asset_key": "b"}}}
            ]}
        })))
        .mount(&server)
        .await;
    let app = app(&server, &output);

    let (status, response) = send_json(&app, "/update").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            "status": "success",
            "message": "Files updated successfully",
            "assets_count": 2
        })
    );
    for name in ["api.json", "max.json", "playlist.m3u"] {
        assert!(output.path().join(name).exists(), "{name} not written");
    }
}

#[tokio::test]
async fn test_update_without_assets_is_bad_request() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/catalogue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultObj": {}})))
        .mount(&server)
        .await;
    let app = app(&server, &output);

    let (status, response) = send_json(&app, "/update").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response,
        json!({"status": "error", "message": "No DAI assets found"})
    );
    assert!(!output.path().join("api.json").exists());
}

#[tokio::test]
async fn test_schedule_feed_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/schedule/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;
    let app = app(&server, &output);

    let (status, response) = send_json(&app, "/schedule").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response, json!({"error": "No matches found in response"}));
    assert!(output.path().join("s1.json").exists());
}

#[tokio::test]
async fn test_schedule_with_empty_feed() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/schedule/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"matches": []})))
        .mount(&server)
        .await;
    let app = app(&server, &output);

    let (status, response) = send_json(&app, "/schedule").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({}));
}

#[tokio::test]
async fn test_unknown_route() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    let app = app(&server, &output);

    let (status, _) = send_request(&app, Method::GET, "/api/v1/sources").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
