//! Candidate phrase enumeration.

/// Inclusive token range `[start, end]` of a candidate phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseRange {
    pub start: usize,
    pub end: usize,
}

impl PhraseRange {
    /// Number of tokens in the range.
    pub fn token_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Lazy sequence of token ranges containing the cursor word.
///
/// Ordered by descending length, then ascending start. Holds no state beyond
/// its own position, so every scan builds a fresh one.
#[derive(Debug, Clone)]
pub struct Phrases {
    count: usize,
    cursor: usize,
    len: usize,
    start: usize,
}

impl Phrases {
    fn first_start(&self, len: usize) -> usize {
        (self.cursor + 1).saturating_sub(len)
    }

    fn last_start(&self, len: usize) -> usize {
        self.cursor.min(self.count - len)
    }
}

impl Iterator for Phrases {
    type Item = PhraseRange;

    fn next(&mut self) -> Option<PhraseRange> {
        while self.len > 0 {
            if self.start <= self.last_start(self.len) {
                let range =
                    PhraseRange { start: self.start, end: self.start + self.len - 1 };
                self.start += 1;
                return Some(range);
            }
            self.len -= 1;
            self.start = self.first_start(self.len);
        }
        None
    }
}

/// Enumerate phrases over `count` tokens that contain token `cursor`.
///
/// Yields nothing when `cursor` is not a valid token index.
pub fn enumerate_phrases(count: usize, cursor: usize) -> Phrases {
    let len = if cursor < count { count } else { 0 };
    let mut phrases = Phrases { count, cursor, len, start: 0 };
    phrases.start = phrases.first_start(len);
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(count: usize, cursor: usize) -> Vec<(usize, usize)> {
        enumerate_phrases(count, cursor).map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_longest_first() {
        // "New York City", cursor on "York"
        let all = ranges(3, 1);
        assert_eq!(all[0], (0, 2));
        assert_eq!(all, vec![(0, 2), (0, 1), (1, 2), (1, 1)]);
    }

    #[test]
    fn test_cursor_at_edges() {
        assert_eq!(ranges(3, 0), vec![(0, 2), (0, 1), (0, 0)]);
        assert_eq!(ranges(3, 2), vec![(0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_every_range_contains_cursor_and_lengths_descend() {
        let count = 7;
        let cursor = 3;
        let all: Vec<_> = enumerate_phrases(count, cursor).collect();

        // Spans containing index 3 in 7 tokens: 4 starts x 4 ends.
        assert_eq!(all.len(), 16);
        assert!(all.iter().all(|r| r.start <= cursor && cursor <= r.end && r.end < count));
        assert!(all.windows(2).all(|w| {
            let (a, b) = (w[0].token_count(), w[1].token_count());
            a > b || (a == b && w[0].start < w[1].start)
        }));
    }

    #[test]
    fn test_single_token() {
        assert_eq!(ranges(1, 0), vec![(0, 0)]);
    }

    #[test]
    fn test_invalid_cursor_yields_nothing() {
        assert!(ranges(0, 0).is_empty());
        assert!(ranges(2, 5).is_empty());
    }

    #[test]
    fn test_restartable() {
        let first: Vec<_> = enumerate_phrases(4, 2).collect();
        let second: Vec<_> = enumerate_phrases(4, 2).collect();
        assert_eq!(first, second);
    }
}
