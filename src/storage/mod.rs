//! Record Store Module
//!
//! Holds the message corpus in memory exactly as it arrived from the upstream API.
//!
//! ## Lifecycle
//! 1. **Empty**: the process starts with no store at all.
//! 2. **Populated**: ingestion hands its collected batch over in one move.
//! 3. **Read-only**: from then on positions are stable and the store is only read,
//!    which is what lets the inverted index refer to messages by position.

pub mod memory;
