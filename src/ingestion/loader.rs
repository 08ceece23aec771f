use super::client::UpstreamClient;
use super::types::IngestionSettings;
use crate::search::engine::SearchEngine;
use std::sync::Arc;
use std::time::Instant;

/// Startup load: pulls the whole corpus from upstream and populates the engine.
///
/// The engine always ends up ready. A client that cannot even be constructed, a
/// terminal upstream error or exhausted retries all degrade to "whatever was
/// collected", down to zero messages.
pub async fn load_corpus(settings: IngestionSettings, engine: Arc<SearchEngine>) {
    let started = Instant::now();

    let messages = match UpstreamClient::new(settings) {
        Ok(client) => {
            let report = client.fetch_all().await;
            if !report.complete {
                tracing::warn!(
                    "Partial load: {} messages from {} pages",
                    report.messages.len(),
                    report.pages
                );
            }
            if report.skipped > 0 {
                tracing::warn!("Skipped {} malformed messages", report.skipped);
            }
            report.messages
        }
        Err(e) => {
            tracing::error!("Failed to build upstream client: {}", e);
            Vec::new()
        }
    };

    engine.populate(messages);
    tracing::info!("Ready to serve requests ({:?} to load)", started.elapsed());
}
