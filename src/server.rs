//! HTTP Service Front
//!
//! Routes, middleware and the serve loop. All search state is reached through
//! `Extension` layers holding shared, read-only handles.

use crate::metrics::RequestMetrics;
use crate::search::engine::SearchEngine;
use crate::search::handlers::{handle_health, handle_metrics, handle_search, handle_stats};
use axum::http::Method;
use axum::routing::get;
use axum::{Extension, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::compression::predicate::{DefaultPredicate, SizeAbove};
use tower_http::compression::{CompressionLayer, Predicate};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Responses smaller than this are sent uncompressed.
const COMPRESSION_MIN_SIZE: u16 = 500;

pub fn build_router(engine: Arc<SearchEngine>, metrics: Arc<RequestMetrics>) -> Router {
    let compression = CompressionLayer::new()
        .compress_when(DefaultPredicate::new().and(SizeAbove::new(COMPRESSION_MIN_SIZE)));
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_health))
        .route("/search", get(handle_search))
        .route("/stats", get(handle_stats))
        .route("/metrics", get(handle_metrics))
        .layer(Extension(engine))
        .layer(Extension(metrics))
        .layer(compression)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serves until Ctrl-C or SIGTERM.
pub async fn serve(bind_addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
