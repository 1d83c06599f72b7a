use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use server::config::ServerConfig;
use server::metrics::{self, AppMetrics};
use server::{build_router, AppState};
use tts_core::{RegionTable, RemoteSynthesizer, VoiceCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    info!("Starting TTS streaming server...");

    metrics::init_start_time();
    let config = ServerConfig::from_env();

    let catalog = Arc::new(VoiceCatalog::default());
    info!("Voice catalog loaded: {} voices", catalog.voices().len());

    let state = AppState {
        catalog,
        synthesizer: Arc::new(RemoteSynthesizer::new()),
        routes: Arc::new(RegionTable::default()),
        metrics: Arc::new(AppMetrics::new()),
        config: config.clone(),
    };

    info!(
        "Server configuration loaded: port={}, default_voice={}, chunk_size={}, rate_limit={}/min",
        config.port, config.default_voice, config.chunk_size, config.rate_limit_per_minute
    );

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}. Try a different PORT."))?;

    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
