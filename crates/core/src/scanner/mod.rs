//! Phrase scanning around an edit cursor.
//!
//! A scan runs in three steps:
//! - delimit the sentence enclosing the cursor ([`scan_sentence`])
//! - split it into word tokens ([`tokenize`]) and find the word under the cursor
//! - enumerate candidate phrases containing that word, longest first
//!
//! Nothing is retained between scans.

pub mod phrase;
pub mod sentence;
pub mod tokenizer;

pub use phrase::{PhraseRange, Phrases, enumerate_phrases};
pub use sentence::{TERMINATORS, scan_sentence};
pub use tokenizer::{locate_cursor_word, tokenize};

/// A word token with half-open byte offsets relative to its sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// A candidate phrase materialized against the original line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    /// Text of the line between the first and last token, inclusive.
    pub text: String,
    /// Byte offset in the line where the phrase starts.
    pub line_start: usize,
    /// Byte offset in the line where the phrase ends (exclusive).
    pub line_end: usize,
}

/// The tokenized sentence around a cursor, ready for phrase enumeration.
#[derive(Debug, Clone)]
pub struct PhraseScan<'a> {
    sentence: &'a str,
    sentence_offset: usize,
    tokens: Vec<Token>,
    cursor_word: usize,
}

impl<'a> PhraseScan<'a> {
    /// Scan `line` around the byte offset `cursor`.
    ///
    /// Returns `None` when the cursor is malformed or touches no word.
    pub fn new(line: &'a str, cursor: usize) -> Option<Self> {
        let (sentence, sentence_offset) = scan_sentence(line, cursor)?;
        let cursor_in_sentence = cursor.checked_sub(sentence_offset)?;
        let tokens = tokenize(sentence);
        let cursor_word = locate_cursor_word(&tokens, cursor_in_sentence)?;

        Some(Self { sentence, sentence_offset, tokens, cursor_word })
    }

    pub fn sentence(&self) -> &'a str {
        self.sentence
    }

    pub fn sentence_offset(&self) -> usize {
        self.sentence_offset
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of the token under the cursor.
    pub fn cursor_word(&self) -> usize {
        self.cursor_word
    }

    /// Materialize a token range into line coordinates.
    pub fn span(&self, range: PhraseRange) -> PhraseSpan {
        let start = self.tokens[range.start].start;
        let end = self.tokens[range.end].end;
        PhraseSpan {
            text: self.sentence[start..end].to_string(),
            line_start: self.sentence_offset + start,
            line_end: self.sentence_offset + end,
        }
    }

    /// Candidate phrases containing the cursor word, longest first.
    pub fn candidates(&self) -> impl Iterator<Item = PhraseSpan> + '_ {
        enumerate_phrases(self.tokens.len(), self.cursor_word).map(|r| self.span(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_candidates_in_line_coordinates() {
        let line = "Trip notes. We flew to New York City today!";
        let cursor = line.find("York").unwrap() + 1;
        let scan = PhraseScan::new(line, cursor).unwrap();

        assert_eq!(scan.sentence(), "We flew to New York City today");
        assert_eq!(scan.tokens()[scan.cursor_word()].word, "York");

        let first = scan.candidates().next().unwrap();
        assert_eq!(first.text, "We flew to New York City today");
        assert_eq!(&line[first.line_start..first.line_end], first.text);

        let york = scan.candidates().last().unwrap();
        assert_eq!(york.text, "York");
        assert_eq!(york.line_start, line.find("York").unwrap());
    }

    #[test]
    fn test_phrase_text_keeps_inner_punctuation() {
        let line = "Paris, France";
        let scan = PhraseScan::new(line, 1).unwrap();
        let first = scan.candidates().next().unwrap();
        assert_eq!(first.text, "Paris, France");
    }

    #[test]
    fn test_cursor_after_word_end_touches_word() {
        let line = "I visited Paris.";
        let scan = PhraseScan::new(line, 15).unwrap();
        assert_eq!(scan.tokens()[scan.cursor_word()].word, "Paris");
    }

    #[test]
    fn test_no_word_under_cursor() {
        assert!(PhraseScan::new("one  two", 4).is_none());
        assert!(PhraseScan::new("See Paris. Visit", 10).is_none());
        assert!(PhraseScan::new("...", 1).is_none());
        assert!(PhraseScan::new("word", 9).is_none());
    }
}
