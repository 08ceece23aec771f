use super::engine::SearchEngine;
use super::types::{HealthResponse, MetricsResponse, SearchResponse, StatsResponse};
use crate::error::SearchError;
use crate::metrics::RequestMetrics;
use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

const SERVICE_NAME: &str = "Message Search API";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl SearchParams {
    /// Applies defaults and checks `page >= 1` and `1 <= limit <= MAX_LIMIT`.
    pub fn validate(&self) -> Result<(usize, usize), SearchError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(SearchError::InvalidRequest(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(SearchError::InvalidRequest(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok((page, limit))
    }
}

pub async fn handle_health(
    Extension(engine): Extension<Arc<SearchEngine>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        messages_loaded: engine.message_count(),
        ready: engine.is_ready(),
        optimizations: vec![
            "In-memory storage",
            "Pre-built search indices",
            "GZIP compression",
        ],
    })
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(engine): Extension<Arc<SearchEngine>>,
    Extension(metrics): Extension<Arc<RequestMetrics>>,
) -> Result<Json<SearchResponse>, SearchError> {
    let (page, limit) = params.validate()?;
    metrics.record_search();

    if !engine.is_ready() {
        tracing::debug!("Search rejected, engine still loading");
        return Err(SearchError::NotReady);
    }

    let query = params.q.as_deref().unwrap_or_default();
    engine.search(query, page, limit).map(Json)
}

pub async fn handle_stats(
    Extension(engine): Extension<Arc<SearchEngine>>,
    Extension(metrics): Extension<Arc<RequestMetrics>>,
) -> Json<StatsResponse> {
    let response = match engine.stats() {
        Some(stats) => StatsResponse::Loaded {
            total_messages: stats.total_messages,
            unique_users: stats.unique_users,
            users: stats.users,
            indexed_terms: stats.indexed_terms,
            requests_served: metrics.total_requests(),
            search_requests: metrics.search_requests(),
            loaded: true,
        },
        None => StatsResponse::Loading { status: "loading" },
    };

    Json(response)
}

pub async fn handle_metrics(
    Extension(engine): Extension<Arc<SearchEngine>>,
    Extension(metrics): Extension<Arc<RequestMetrics>>,
) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        total_requests: metrics.total_requests(),
        search_requests: metrics.search_requests(),
        messages_in_memory: engine.message_count(),
        indexed_terms: engine.indexed_terms(),
    })
}
