//! Ranked lookup of link targets by prefix and fuzzy subsequence match.
//!
//! Two passes over the keyspace, in order:
//! - Prefix: the normalized key starts with the normalized query
//! - Fuzzy: the normalized query is an ordered subsequence of the key
//!
//! Prefix results always come first. Results are deduplicated by entry
//! identity, keeping the earliest occurrence, and capped.

use std::collections::HashSet;

use serde::Serialize;

use super::store::LinkIndex;
use super::types::{EntryKind, IndexEntry};
use crate::normalize::{is_subsequence, normalize};

/// Maximum number of results returned by a lookup.
pub const MAX_RESULTS: usize = 100;

/// How a result was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRank {
    Prefix,
    Fuzzy,
}

impl MatchRank {
    /// Lower is better.
    pub fn score(&self) -> f32 {
        match self {
            Self::Prefix => 0.0,
            Self::Fuzzy => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// A ranked lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub entry: IndexEntry,
    pub rank: MatchRank,
}

/// Look up `query` in `index`, returning at most [`MAX_RESULTS`] matches.
///
/// A query that normalizes to nothing returns no matches.
pub fn find_matches(index: &LinkIndex, query: &str) -> Vec<Match> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut collector = Collector::default();

    for (_, bucket) in index.prefixed(&needle) {
        if collector.extend(bucket, MatchRank::Prefix) {
            return collector.results;
        }
    }

    // Keys that start with the needle were all handled above.
    for (key, bucket) in index.iter() {
        if key.starts_with(needle.as_str()) || !is_subsequence(&needle, key) {
            continue;
        }
        if collector.extend(bucket, MatchRank::Fuzzy) {
            break;
        }
    }

    collector.results
}

#[derive(Default)]
struct Collector {
    seen: HashSet<(EntryKind, String, String)>,
    results: Vec<Match>,
}

impl Collector {
    /// Add new entries from a bucket. Returns `true` once the cap is reached.
    fn extend(&mut self, bucket: &[IndexEntry], rank: MatchRank) -> bool {
        for entry in bucket {
            if self.results.len() >= MAX_RESULTS {
                return true;
            }
            let identity = (entry.kind, entry.source_id.clone(), entry.target.clone());
            if self.seen.insert(identity) {
                self.results.push(Match { entry: entry.clone(), rank });
            }
        }
        self.results.len() >= MAX_RESULTS
    }
}
