//! Message Search Service Library
//!
//! An in-memory search service over a small, static corpus of messages that is
//! fetched once from an upstream API at startup and kept until the process exits.
//!
//! ## Modules
//!
//! - **`search`**: The core. Message model, inverted index, query resolution with
//!   substring fallback, pagination and the write-once `SearchEngine`.
//! - **`storage`**: The ordered, read-only record store the index points into.
//! - **`ingestion`**: Startup download of the corpus with bounded retry and backoff.
//! - **`server`**: Axum router, middleware and graceful shutdown.
//! - **`config`**: Command-line and environment configuration.
//! - **`error`**: Search and ingestion error types.
//! - **`metrics`**: Request counters.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod search;
pub mod server;
pub mod storage;
