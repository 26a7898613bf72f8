mod config;
mod errors;
mod llm_client;
mod prediction;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::prediction::predictor::PredictionClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Campus Predict API v{}", env!("CARGO_PKG_VERSION"));

    // The generator handle is decided once here and never re-initialized
    let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(api_key) => {
            let client: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
                api_key.clone(),
                config.gemini_base_url.clone(),
            )?);
            info!("LLM client initialized (model: {})", config.gemini_model);
            Some(client)
        }
        None => {
            warn!("No Gemini API key configured; predictions will use defaults");
            None
        }
    };

    let state = AppState {
        predictor: PredictionClient::new(generator, config.gemini_model.clone()),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
