use super::engine::MatchSet;
use super::types::{Message, SearchResponse};
use crate::storage::memory::MessageStore;
use std::time::Instant;

/// Slices a match set into one page and fills in the pagination metadata.
///
/// `started` is the instant taken right before query resolution; the elapsed time is
/// reported in milliseconds rounded to two decimals. Pages past the end, as well as
/// `page == 0` or `limit == 0`, produce an empty `items` list rather than an error.
pub fn paginate(
    matches: &MatchSet,
    store: &MessageStore,
    page: usize,
    limit: usize,
    started: Instant,
) -> SearchResponse {
    let total = matches.len();
    let total_pages = total_pages(total, limit);

    let items: Vec<Message> = if page == 0 || limit == 0 {
        Vec::new()
    } else {
        let start = (page - 1).saturating_mul(limit);
        matches
            .positions()
            .skip(start)
            .take(limit)
            .filter_map(|position| store.at(position).ok())
            .cloned()
            .collect()
    };

    SearchResponse {
        total,
        page,
        limit,
        total_pages,
        items,
        query_time_ms: elapsed_ms(started),
    }
}

/// `ceil(total / limit)`, defined as 1 when `limit` is 0.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        1
    } else {
        total.div_ceil(limit)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    let ms = started.elapsed().as_secs_f64() * 1000.0;
    (ms * 100.0).round() / 100.0
}
