//! Suggestion and immediate-link flows over the shared phrase pipeline.

use serde::Serialize;

use super::{LinkEngine, Notice};
use crate::index::{IndexEntry, Match, find_matches};
use crate::link::{TextReplacement, resolve_link_text};
use crate::scanner::{PhraseScan, PhraseSpan};

/// A phrase under the cursor with the targets it could link to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Matched phrase, as it reads without any trigger text.
    pub phrase: String,
    /// Start of the phrase in the line.
    pub span_start: usize,
    /// End of the phrase in the line (exclusive).
    pub span_end: usize,
    /// Start of the text a chosen link replaces; before `span_start` when a
    /// trigger typed right before the phrase must be consumed as well.
    pub replace_start: usize,
    /// End of the text a chosen link replaces; past `span_end` when a
    /// trigger typed after the phrase must be consumed as well.
    pub replace_end: usize,
    #[serde(skip)]
    pub matches: Vec<Match>,
}

impl Suggestion {
    /// The edit that links the phrase to `matches[choice]`.
    pub fn replacement(&self, choice: usize) -> Option<TextReplacement> {
        let chosen = self.matches.get(choice)?;
        Some(TextReplacement {
            span_start: self.replace_start,
            span_end: self.replace_end,
            replacement: resolve_link_text(&chosen.entry, &self.phrase),
        })
    }
}

/// Result of an immediate-link request.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkOutcome {
    Linked { phrase: String, entry: IndexEntry, replacement: TextReplacement },
    NoMatch,
}

/// Which candidate phrase a flow settles on.
#[derive(Debug, Clone, Copy)]
enum Selection {
    /// The longest phrase with any match.
    FirstWithResults,
    /// The longest phrase whose best match reads exactly like it, ignoring case.
    FirstExact,
}

impl Selection {
    fn accepts(self, phrase: &PhraseSpan, matches: &[Match]) -> bool {
        match self {
            Self::FirstWithResults => !matches.is_empty(),
            Self::FirstExact => matches
                .first()
                .is_some_and(|best| best.entry.display_text.to_lowercase() == phrase.text.to_lowercase()),
        }
    }
}

impl LinkEngine {
    /// Find the longest phrase around `cursor` that matches any target.
    ///
    /// With a trigger key configured, nothing is suggested unless the text
    /// right before the cursor is the trigger.
    pub fn request_suggestion(&self, line: &str, cursor: usize) -> Option<Suggestion> {
        let trigger = self.config.trigger_key.as_str();
        if trigger.is_empty() {
            let (span, matches) = self.select(line, cursor, Selection::FirstWithResults)?;
            return Some(Suggestion {
                phrase: span.text,
                span_start: span.line_start,
                span_end: span.line_end,
                replace_start: span.line_start,
                replace_end: span.line_end,
                matches,
            });
        }

        let before = cursor.checked_sub(trigger.len())?;
        if line.get(before..cursor) != Some(trigger) {
            return None;
        }

        // Scan as if the trigger had not been typed, then map back. A phrase
        // starting where the trigger was starts after it in the line, and a
        // phrase ending there ends before it.
        let stripped = format!("{}{}", &line[..before], &line[cursor..]);
        let (span, matches) = self.select(&stripped, before, Selection::FirstWithResults)?;
        let shift = |pos: usize, past: bool| if past { pos + trigger.len() } else { pos };
        let span_start = shift(span.line_start, span.line_start >= before);
        let span_end = shift(span.line_end, span.line_end > before);

        Some(Suggestion {
            phrase: span.text,
            span_start,
            span_end,
            replace_start: span_start.min(before),
            replace_end: span_end.max(cursor),
            matches,
        })
    }

    /// Link the longest phrase around `cursor` whose best match is an exact
    /// (case-insensitive) hit. Raises [`Notice::NoMatch`] when there is none.
    pub fn request_immediate_link(&self, line: &str, cursor: usize) -> LinkOutcome {
        let Some((span, mut matches)) = self.select(line, cursor, Selection::FirstExact) else {
            self.push_notice(Notice::NoMatch);
            return LinkOutcome::NoMatch;
        };

        let entry = matches.swap_remove(0).entry;
        let replacement = TextReplacement {
            span_start: span.line_start,
            span_end: span.line_end,
            replacement: resolve_link_text(&entry, &span.text),
        };
        LinkOutcome::Linked { phrase: span.text, entry, replacement }
    }

    fn select(
        &self,
        line: &str,
        cursor: usize,
        selection: Selection,
    ) -> Option<(PhraseSpan, Vec<Match>)> {
        let scan = PhraseScan::new(line, cursor)?;
        let index = self.index.borrow();

        for phrase in scan.candidates() {
            let matches = find_matches(&index, &phrase.text);
            if selection.accepts(&phrase, &matches) {
                tracing::debug!(phrase = %phrase.text, matches = matches.len(), "phrase selected");
                return Some((phrase, matches));
            }
        }
        tracing::trace!(line, cursor, "no linkable phrase");
        None
    }
}
