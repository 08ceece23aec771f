use serde::{Deserialize, Serialize};

/// A single message record as delivered by the upstream API.
///
/// Immutable once stored. `id` is expected to be unique but nothing enforces it;
/// duplicates occupy separate positions in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub items: Vec<Message>,
    pub query_time_ms: f64,
}

/// Read-only introspection over the loaded corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    pub total_messages: usize,
    pub indexed_terms: usize,
    pub unique_users: usize,
    pub users: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub messages_loaded: usize,
    pub ready: bool,
    pub optimizations: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Loading {
        status: &'static str,
    },
    Loaded {
        total_messages: usize,
        unique_users: usize,
        users: Vec<String>,
        indexed_terms: usize,
        requests_served: u64,
        search_requests: u64,
        loaded: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub total_requests: u64,
    pub search_requests: u64,
    pub messages_in_memory: usize,
    pub indexed_terms: usize,
}
