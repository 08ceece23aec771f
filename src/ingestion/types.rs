//! Ingestion Data Types
//!
//! Wire format of the upstream paginated API and the settings and results of one
//! ingestion run.

use crate::search::types::Message;
use serde::Deserialize;
use std::time::Duration;

/// One page returned by `GET <source>?skip=..&limit=..`.
///
/// Items are kept as raw JSON so that a single malformed record can be skipped
/// without discarding the rest of the page.
#[derive(Debug, Default, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub total: usize,
}

/// Tunables for talking to the upstream API.
#[derive(Debug, Clone)]
pub struct IngestionSettings {
    pub source_url: String,
    pub page_size: usize,
    /// Attempts per page, including the first one.
    pub max_retries: usize,
    pub request_timeout: Duration,
    /// Pause between two successful page fetches.
    pub page_delay: Duration,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            source_url: "https://november7-730026606190.europe-west1.run.app/messages"
                .to_string(),
            page_size: 100,
            max_retries: 3,
            request_timeout: Duration::from_secs(30),
            page_delay: Duration::from_millis(200),
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(8000),
        }
    }
}

/// Everything one ingestion run managed to collect.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub messages: Vec<Message>,
    pub pages: usize,
    pub skipped: usize,
    /// `false` when the run stopped on an error before reaching the upstream total.
    pub complete: bool,
}
