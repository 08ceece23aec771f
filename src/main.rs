use clap::Parser;
use message_search::config::Config;
use message_search::ingestion::loader::load_corpus;
use message_search::metrics::RequestMetrics;
use message_search::search::engine::SearchEngine;
use message_search::server::{build_router, serve};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Starting message search service");
    tracing::info!("Source: {}", config.source_url);

    let engine = Arc::new(SearchEngine::new());
    let metrics = Arc::new(RequestMetrics::new());

    // 1. Load the corpus in the background; /search answers 503 until it is done.
    let loader_engine = engine.clone();
    let settings = config.ingestion();
    tokio::spawn(async move {
        load_corpus(settings, loader_engine).await;
    });

    // 2. Serve HTTP:
    let app = build_router(engine, metrics);
    serve(config.bind, app).await?;

    Ok(())
}
