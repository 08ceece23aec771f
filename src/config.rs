//! Runtime configuration, read from command-line flags with environment fallbacks.

use crate::ingestion::types::IngestionSettings;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "message-search", version, about = "In-memory message search service")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Upstream paginated messages endpoint.
    #[arg(
        long,
        env = "SOURCE_URL",
        default_value = "https://november7-730026606190.europe-west1.run.app/messages"
    )]
    pub source_url: String,

    /// Messages requested per upstream page.
    #[arg(long, env = "PAGE_SIZE", default_value_t = 100)]
    pub page_size: usize,

    /// Attempts per upstream page before giving up.
    #[arg(long, env = "MAX_RETRIES", default_value_t = 3)]
    pub max_retries: usize,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Pause between upstream pages.
    #[arg(long, env = "PAGE_DELAY_MS", default_value_t = 200)]
    pub page_delay_ms: u64,

    #[arg(long, env = "RETRY_BACKOFF_MS", default_value_t = 1000)]
    pub retry_backoff_ms: u64,

    #[arg(long, env = "MAX_BACKOFF_MS", default_value_t = 8000)]
    pub max_backoff_ms: u64,

    /// One of trace, debug, info, warn, error.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Config {
    pub fn ingestion(&self) -> IngestionSettings {
        IngestionSettings {
            source_url: self.source_url.clone(),
            page_size: self.page_size,
            max_retries: self.max_retries,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            page_delay: Duration::from_millis(self.page_delay_ms),
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}
