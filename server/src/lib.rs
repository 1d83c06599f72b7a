//! HTTP and WebSocket surface for the streaming TTS service.
//!
//! The router exposes voice discovery, health and metrics endpoints, a
//! static landing page, and the `/ws/tts` streaming session endpoint.

pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
pub mod validation;

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Request, State, WebSocketUpgrade},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use tts_core::{RegionTable, Synthesizer, VoiceCatalog, VoiceDescriptor};

use crate::config::ServerConfig;
use crate::metrics::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<VoiceCatalog>,
    pub synthesizer: Arc<dyn Synthesizer>,
    pub routes: Arc<RegionTable>,
    pub metrics: Arc<AppMetrics>,
    pub config: ServerConfig,
}

#[derive(Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceDescriptor>,
}

pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_voices(State(state): State<AppState>) -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: state.catalog.voices().to_vec(),
    })
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> Json<metrics::MetricsResponse> {
    Json(metrics::collect(&state.metrics))
}

pub async fn tts_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| session::handle_session(socket, state))
}

// CORS configuration - environment-aware
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let permissive = || {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    };

    if let Some(ref allowed_origins) = config.cors_allowed_origins {
        let origins: Vec<axum::http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        if origins.is_empty() {
            warn!("CORS_ALLOWED_ORIGINS is empty, falling back to permissive CORS");
            permissive()
        } else {
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::list(origins))
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers(tower_http::cors::Any)
        }
    } else {
        warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (development mode)");
        permissive()
    }
}

// Request ID middleware for tracing
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    request.headers_mut().insert(
        "x-request-id",
        axum::http::HeaderValue::from_str(&request_id).unwrap(),
    );
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        "x-request-id",
        axum::http::HeaderValue::from_str(&request_id).unwrap(),
    );
    response
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    // Global rate limit across all HTTP requests; WebSocket traffic is only
    // limited at upgrade time, one request per connection.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(((config.rate_limit_per_minute / 60).max(1)) as u64)
            .burst_size(config.rate_limit_per_minute)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .unwrap(),
    );

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .into_inner();

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/voices", get(list_voices))
        .route("/metrics", get(metrics_endpoint));

    let static_dir = Path::new(&config.static_dir);

    Router::new()
        .merge(api.clone()) // root paths
        .nest("/api", api) // /api prefix
        .route("/ws/tts", get(tts_ws))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(middleware_stack)
        .with_state(state)
}
