use crate::error::SearchError;
use crate::search::types::Message;

/// Ordered, 0-indexed sequence of messages in ingestion order.
///
/// There is no mutating API: a store is built in one go from the ingested batch and
/// afterwards only handed out by shared reference, so readers never need a lock.
#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Positional access. Positions coming from the index are always valid, so the
    /// error only shows up for direct callers passing an arbitrary position.
    pub fn at(&self, position: usize) -> Result<&Message, SearchError> {
        self.messages.get(position).ok_or(SearchError::OutOfRange {
            position,
            len: self.messages.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Message)> {
        self.messages.iter().enumerate()
    }
}

impl From<Vec<Message>> for MessageStore {
    fn from(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }
}
