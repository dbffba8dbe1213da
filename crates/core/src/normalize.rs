//! Key normalization for index storage and lookup.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize text into an index key.
///
/// Applies canonical decomposition, drops combining marks, lowercases, and
/// keeps only Unicode letters and numbers. Total and idempotent: empty input
/// (or input with no letters or numbers) yields an empty key.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// True when `query` is an ordered (not necessarily contiguous) subsequence
/// of `key`. Both sides are expected to be normalized already.
pub fn is_subsequence(query: &str, key: &str) -> bool {
    let mut key_chars = key.chars();
    query.chars().all(|q| key_chars.any(|k| k == q))
}
