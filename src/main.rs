//! Gouv Bot - chat widget for Togolese government services
//!
//! Serves a chat UI that forwards conversations to a RAG backend and renders
//! the dynamic forms the backend asks for.

mod api;
mod config;
mod form;
mod rag;
mod runtime;
mod session;
mod state_machine;

use api::{create_router, AppState};
use config::Config;
use rag::{ChatTransport, HttpRagService, LoggingService};
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
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gouv_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    let rag = HttpRagService::new(&config.rag_url, config.request_timeout)?;
    let transport = ChatTransport::new(Arc::new(LoggingService::new(Arc::new(rag))));
    tracing::info!(
        endpoint = %config.rag_url,
        timeout_secs = config.request_timeout.as_secs(),
        "RAG backend configured"
    );

    let state = AppState::new(transport, config.session_idle_timeout);

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
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Gouv Bot server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
