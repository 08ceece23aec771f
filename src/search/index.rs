use super::tokenizer::{tokenize_message, user_key};
use crate::storage::memory::MessageStore;
use std::collections::HashMap;

/// Term to ascending, duplicate-free list of store positions.
pub type Postings = HashMap<String, Vec<usize>>;

/// Two inverted indices derived from a [`MessageStore`].
///
/// - `body`: every whitespace-delimited, lower-cased word of a message body.
/// - `user`: the whole lower-cased user name, not tokenized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    body: Postings,
    user: Postings,
}

impl InvertedIndex {
    /// Builds both indices in a single pass over the store.
    ///
    /// Positions are visited in increasing order, so each posting list comes out
    /// sorted without a sort step. A position is only appended when it differs from
    /// the list's last entry, which keeps a word repeated inside one message from
    /// being recorded twice.
    pub fn build(store: &MessageStore) -> Self {
        let mut body: Postings = HashMap::with_capacity(store.len());
        let mut user: Postings = HashMap::new();

        for (position, message) in store.iter() {
            for term in tokenize_message(&message.message) {
                append_once(body.entry(term).or_default(), position);
            }
            append_once(user.entry(user_key(&message.user_name)).or_default(), position);
        }

        body.shrink_to_fit();
        user.shrink_to_fit();

        tracing::debug!(
            "Built inverted index: {} body terms, {} user keys",
            body.len(),
            user.len()
        );

        Self { body, user }
    }

    pub fn body_postings(&self, term: &str) -> Option<&[usize]> {
        self.body.get(term).map(Vec::as_slice)
    }

    pub fn user_postings(&self, key: &str) -> Option<&[usize]> {
        self.user.get(key).map(Vec::as_slice)
    }

    /// Number of distinct message-body terms.
    pub fn term_count(&self) -> usize {
        self.body.len()
    }

    pub fn user_key_count(&self) -> usize {
        self.user.len()
    }
}

fn append_once(postings: &mut Vec<usize>, position: usize) {
    if postings.last() != Some(&position) {
        postings.push(position);
    }
}
