use super::index::InvertedIndex;
use super::paginate::paginate;
use super::tokenizer::normalize_query;
use super::types::{CorpusStats, Message, SearchResponse};
use crate::error::SearchError;
use crate::storage::memory::MessageStore;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Instant;

/// Ascending store positions satisfying a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSet {
    /// Every position in `[0, len)`; produced by the empty query.
    All(usize),
    Positions(Vec<usize>),
}

impl MatchSet {
    pub fn len(&self) -> usize {
        match self {
            MatchSet::All(len) => *len,
            MatchSet::Positions(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        let (all, listed): (usize, &[usize]) = match self {
            MatchSet::All(len) => (*len, &[]),
            MatchSet::Positions(positions) => (0, positions.as_slice()),
        };
        (0..all).chain(listed.iter().copied())
    }
}

/// Resolves a raw query against the index, falling back to a substring scan.
///
/// 1. The query is trimmed and lower-cased; an empty query matches the whole store.
/// 2. Exact-term path: union of the body postings and the user postings for the
///    whole normalized query.
/// 3. Only if that union is empty, every message is scanned for the query as a
///    substring of its lower-cased body or user name.
///
/// A query that hits the index is never widened by the scan, so a word that also
/// occurs inside longer words only counts its standalone occurrences.
pub fn resolve(query: &str, index: &InvertedIndex, store: &MessageStore) -> MatchSet {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return MatchSet::All(store.len());
    }

    let body = index.body_postings(&normalized).unwrap_or_default();
    let user = index.user_postings(&normalized).unwrap_or_default();
    let exact = merge_ascending(body, user);
    if !exact.is_empty() {
        return MatchSet::Positions(exact);
    }

    tracing::debug!("No exact term for '{}', scanning all messages", normalized);
    MatchSet::Positions(substring_scan(&normalized, store))
}

fn substring_scan(normalized: &str, store: &MessageStore) -> Vec<usize> {
    store
        .iter()
        .filter(|(_, message)| matches_substring(normalized, message))
        .map(|(position, _)| position)
        .collect()
}

fn matches_substring(normalized: &str, message: &Message) -> bool {
    message.message.to_lowercase().contains(normalized)
        || message.user_name.to_lowercase().contains(normalized)
}

/// Merges two ascending lists into one ascending list without duplicates.
fn merge_ascending(left: &[usize], right: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let next = left[i].min(right[j]);
        if left[i] == next {
            i += 1;
        }
        if right[j] == next {
            j += 1;
        }
        merged.push(next);
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

/// The loaded corpus: store, its index and the distinct user names.
#[derive(Debug)]
pub struct Corpus {
    pub store: MessageStore,
    pub index: InvertedIndex,
    users: BTreeSet<String>,
}

impl Corpus {
    pub fn build(messages: Vec<Message>) -> Self {
        let store = MessageStore::new(messages);
        let index = InvertedIndex::build(&store);
        let users = store
            .all()
            .iter()
            .map(|message| message.user_name.clone())
            .collect();

        Self {
            store,
            index,
            users,
        }
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            total_messages: self.store.len(),
            indexed_terms: self.index.term_count(),
            unique_users: self.users.len(),
            users: self.users.iter().cloned().collect(),
        }
    }
}

/// Write-once search engine shared between the loader and the request handlers.
///
/// The corpus sits behind a one-shot initialization barrier: the loader sets it
/// once, after which every reader sees the same immutable store and index without
/// taking a lock. Readiness is simply "has the barrier been set".
#[derive(Debug, Default)]
pub struct SearchEngine {
    corpus: OnceLock<Corpus>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store and index from the ingested messages and marks the engine
    /// ready. Only the first call has any effect; later calls return `false`.
    pub fn populate(&self, messages: Vec<Message>) -> bool {
        if self.corpus.get().is_some() {
            tracing::warn!("Search engine already populated, ignoring new batch");
            return false;
        }

        let corpus = Corpus::build(messages);
        let total = corpus.store.len();
        let terms = corpus.index.term_count();

        match self.corpus.set(corpus) {
            Ok(()) => {
                tracing::info!("Loaded {} messages into memory", total);
                tracing::info!("Built search indices for {} terms", terms);
                true
            }
            Err(_) => {
                tracing::warn!("Search engine populated concurrently, dropping batch");
                false
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.corpus.get().is_some()
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.get()
    }

    pub fn message_count(&self) -> usize {
        self.corpus.get().map_or(0, |corpus| corpus.store.len())
    }

    pub fn indexed_terms(&self) -> usize {
        self.corpus.get().map_or(0, |corpus| corpus.index.term_count())
    }

    pub fn stats(&self) -> Option<CorpusStats> {
        self.corpus.get().map(Corpus::stats)
    }

    /// Resolves `query` and returns the requested page.
    ///
    /// Fails only with [`SearchError::NotReady`]; a query without matches is a
    /// successful, empty result.
    pub fn search(
        &self,
        query: &str,
        page: usize,
        limit: usize,
    ) -> Result<SearchResponse, SearchError> {
        let corpus = self.corpus.get().ok_or(SearchError::NotReady)?;

        let started = Instant::now();
        let matches = resolve(query, &corpus.index, &corpus.store);
        let response = paginate(&matches, &corpus.store, page, limit, started);

        tracing::debug!(
            "Search '{}' page={} limit={} -> {} matches in {}ms",
            query,
            page,
            limit,
            response.total,
            response.query_time_ms
        );

        Ok(response)
    }
}
