/// Splits a message body into lower-cased, whitespace-delimited terms.
///
/// Punctuation stays attached to its word ("paris," and "paris" are different terms)
/// and repeated words are yielded once per occurrence.
pub fn tokenize_message(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(|word| word.to_lowercase())
}

/// User names are indexed whole, never split.
pub fn user_key(user_name: &str) -> String {
    user_name.to_lowercase()
}

/// Lower-cases and trims a raw query. An empty result means "match everything".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
