//! Common utilities for integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use server::config::ServerConfig;
use server::metrics::AppMetrics;
use server::{build_router, AppState};
use tts_core::{RegionTable, Synthesizer, VoiceCatalog, VoiceRoute};

/// Provider returning a fixed payload, independent of the request.
pub struct FixedPayloadSynthesizer {
    pub payload: Vec<u8>,
}

#[async_trait]
impl Synthesizer for FixedPayloadSynthesizer {
    async fn render(&self, _text: &str, _route: &VoiceRoute, _rate: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.payload.clone())
    }
}

/// Provider that always fails, for session teardown tests.
pub struct FailingSynthesizer;

#[async_trait]
impl Synthesizer for FailingSynthesizer {
    async fn render(&self, _text: &str, _route: &VoiceRoute, _rate: &str) -> anyhow::Result<Vec<u8>> {
        Err(anyhow::anyhow!("provider unavailable"))
    }
}

/// Provider recording the parameters it was called with.
#[derive(Default)]
pub struct RecordingSynthesizer {
    pub calls: Mutex<Vec<(VoiceRoute, String)>>,
}

#[async_trait]
impl Synthesizer for RecordingSynthesizer {
    async fn render(&self, text: &str, route: &VoiceRoute, rate: &str) -> anyhow::Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((route.clone(), rate.to_string()));
        Ok(text.as_bytes().to_vec())
    }
}

/// Non-uniform payload so concatenation checks are meaningful.
pub fn patterned_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub fn test_state(synthesizer: Arc<dyn Synthesizer>, chunk_size: usize) -> AppState {
    let config = ServerConfig {
        chunk_size,
        ..ServerConfig::default()
    };
    AppState {
        catalog: Arc::new(VoiceCatalog::default()),
        synthesizer,
        routes: Arc::new(RegionTable::default()),
        metrics: Arc::new(AppMetrics::new()),
        config,
    }
}

/// Create a test app instance with a deterministic provider
pub fn create_test_app() -> Router {
    let synthesizer = Arc::new(FixedPayloadSynthesizer {
        payload: patterned_payload(100),
    });
    build_router(test_state(synthesizer, 8192))
}

/// Bind the app to an ephemeral port and serve it in the background.
pub async fn spawn_test_server(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
