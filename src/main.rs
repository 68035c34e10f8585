//! Gemini Chat - web chat front-end for a hosted completion model
//!
//! Each submission from the widget is turned into a transcript and run
//! through a one-node agent graph that calls Gemini once.

mod agent;
mod api;
mod chat;
mod config;
mod graph;
mod llm;
mod transcript;

use agent::Responder;
use api::{create_router, AppState, PageInfo};
use chat::ChatHandler;
use config::{AppConfig, API_KEY_VAR};
use llm::{GeminiService, LlmService, LoggingService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the variables may come from the environment.
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();

    if !config.has_api_key() {
        tracing::warn!(
            "{API_KEY_VAR} not found in the environment or .env; chat requests will fail until it is set"
        );
    }

    // Model client: built once, shared by every request
    let gemini = GeminiService::new(&config.gemini)?;
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(gemini)));
    let responder = Responder::new(llm)?;

    tracing::info!(
        model = %responder.model_id(),
        base_url = %config.gemini.base_url,
        "Model client initialized"
    );

    let state = AppState::new(ChatHandler::new(responder), PageInfo::default());

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Gemini Chat listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
