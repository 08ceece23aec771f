//! Search Service Module
//!
//! The core of the service: everything needed to answer a query against the
//! in-memory message corpus.
//!
//! ## Overview
//! Messages are loaded once at startup and never change afterwards. Right after the
//! load, two inverted indices are built over them (message words and whole user
//! names). Queries first try an exact-term lookup in those indices and fall back to
//! a substring scan of the whole corpus when the lookup finds nothing.
//!
//! ## Submodules
//! - **`engine`**: Query resolution and the write-once `SearchEngine` lifecycle.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`index`**: Inverted index construction.
//! - **`paginate`**: Page slicing and pagination metadata.
//! - **`tokenizer`**: Text normalization shared by indexing and querying.
//! - **`types`**: The message record and API response types.

pub mod engine;
pub mod handlers;
pub mod index;
pub mod paginate;
pub mod tokenizer;
pub mod types;
