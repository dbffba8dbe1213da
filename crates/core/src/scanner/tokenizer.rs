//! Word tokenization within a sentence.

use std::sync::LazyLock;

use regex::Regex;

use super::Token;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Letters, marks and numbers; apostrophes and hyphens only between them
    // so "rock'n'roll" and "well-known" stay whole but "'quoted'" does not.
    Regex::new(r"[\p{L}\p{M}\p{N}](?:[\p{L}\p{M}\p{N}'’-]*[\p{L}\p{M}\p{N}])?").unwrap()
});

/// Split a sentence into word tokens, left to right.
///
/// Offsets are byte offsets relative to `sentence`, half-open.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    WORD_RE
        .find_iter(sentence)
        .map(|m| Token { word: m.as_str().to_string(), start: m.start(), end: m.end() })
        .collect()
}

/// Index of the token the cursor touches.
///
/// A cursor touches a token when it lies within `[start, end]`, so a cursor
/// right after the last character still counts.
pub fn locate_cursor_word(tokens: &[Token], cursor: usize) -> Option<usize> {
    tokens.iter().position(|t| t.start <= cursor && cursor <= t.end)
}
