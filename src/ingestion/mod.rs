//! Ingestion Service Module
//!
//! Pulls the message corpus from the upstream paginated API once, at startup.
//!
//! ## Workflow
//! 1. **Download**: Requests pages of 100 messages with `skip`/`limit`, pausing briefly
//!    between pages to stay under the upstream rate limit.
//! 2. **Retry**: Throttling and transport errors are retried with exponential backoff;
//!    any other upstream status ends the run.
//! 3. **Handover**: Whatever was collected, possibly nothing, is handed to the
//!    `SearchEngine`, which builds its indices and becomes ready.

pub mod client;
pub mod loader;
pub mod types;
