mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod rate_limit;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::RetryPolicy;
use crate::llm_client::{ChatModel, LlmClient};
use crate::rate_limit::SlidingWindowLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sellpoint v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (absent key is reported per request as a 500)
    let llm: Option<Arc<dyn ChatModel>> = match config.llm_config() {
        Some(llm_config) => {
            let client = LlmClient::new(llm_config)?;
            info!(
                "LLM client initialized (model: {}, base: {})",
                client.model(),
                config.ai_api_base
            );
            Some(Arc::new(client))
        }
        None => {
            warn!("AI_API_KEY is not set; /api/generate will fail until it is configured");
            None
        }
    };

    let state = AppState {
        llm,
        admission: Arc::new(SlidingWindowLimiter::default()),
        retry: RetryPolicy::default(),
    };

    let app = build_router(state, &config.static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
