mod config;
mod embedding;
mod errors;
mod evaluation;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, EmbedderBackend};
use crate::embedding::{Embedder, HashEmbedder, RemoteEmbedder};
use crate::routes::build_router;
use crate::scoring::FitPipeline;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fitscore API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize embedder (hash by default, swap via EMBEDDER_BACKEND)
    let embedder = build_embedder(&config)?;
    info!(
        "Embedder initialized (backend: {}, dimension: {})",
        embedder.name(),
        embedder.dimension()
    );

    // Build the pipeline off the executor: the semantic strategy encodes its
    // skill phrases here, which may block on the embedder.
    let scoring = config.scoring_config();
    let pipeline = tokio::task::spawn_blocking(move || FitPipeline::new(embedder, scoring))
        .await
        .context("pipeline construction task failed")?
        .context("failed to build scoring pipeline")?;
    info!(
        "Scoring pipeline ready (skill strategy: {})",
        pipeline.skill_strategy()
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the configured embedding backend.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match config.embedder_backend {
        EmbedderBackend::Hash => Ok(Arc::new(HashEmbedder::new(config.embedding_dimension))),
        EmbedderBackend::Remote => {
            let url = config
                .embedding_api_url
                .clone()
                .context("EMBEDDING_API_URL is required when EMBEDDER_BACKEND=remote")?;
            let embedder = RemoteEmbedder::new(
                tokio::runtime::Handle::current(),
                url,
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_dimension,
            )
            .context("failed to build remote embedder")?;
            Ok(Arc::new(embedder))
        }
    }
}
