//! In-memory mapping from normalized keys to link targets.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use super::types::{DocumentMetadata, EntryKind, IndexEntry};
use crate::normalize::normalize;

/// Normalized key to entries. Buckets are never empty and never hold two
/// entries with the same `(kind, source_id, target)`.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    buckets: BTreeMap<String, Vec<IndexEntry>>,
    /// Aliases per document, kept apart from the buckets because an alias
    /// equal to the title shares the title entry's identity.
    aliases: HashMap<String, Vec<String>>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` under the normalized form of `key_text`.
    ///
    /// Returns `false` when the key normalizes to nothing or the bucket
    /// already holds an entry with the same identity.
    pub fn insert(&mut self, key_text: &str, entry: IndexEntry) -> bool {
        let key = normalize(key_text);
        if key.is_empty() {
            return false;
        }
        self.insert_normalized(key, entry)
    }

    fn insert_normalized(&mut self, key: String, entry: IndexEntry) -> bool {
        let bucket = self.buckets.entry(key).or_default();
        if bucket.iter().any(|e| e.identity() == entry.identity()) {
            return false;
        }
        bucket.push(entry);
        true
    }

    /// Insert every entry derived from a document. Returns how many were added.
    pub fn insert_document(&mut self, source_id: &str, metadata: &DocumentMetadata) -> usize {
        if metadata.aliases.is_empty() {
            self.aliases.remove(source_id);
        } else {
            self.aliases.insert(source_id.to_string(), metadata.aliases.clone());
        }
        metadata
            .entries(source_id)
            .into_iter()
            .filter(|(key, entry)| self.insert(key, entry.clone()))
            .count()
    }

    /// Remove every entry owned by `source_id`, dropping emptied buckets.
    /// Returns how many entries were removed.
    pub fn remove_document(&mut self, source_id: &str) -> usize {
        self.aliases.remove(source_id);
        let mut removed = 0;
        self.buckets.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|e| e.source_id != source_id);
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        removed
    }

    /// Replace a document's entries with ones derived from `metadata`.
    pub fn upsert_document(&mut self, source_id: &str, metadata: &DocumentMetadata) -> usize {
        self.remove_document(source_id);
        self.insert_document(source_id, metadata)
    }

    /// Apply a new title to every entry of `source_id`.
    ///
    /// Title entries (the title and its aliases) are derived again from the
    /// new title and the document's aliases, so an alias survives being used
    /// as a title in between. Heading, block and tag entries keep their
    /// buckets. Returns how many entries the document had.
    pub fn rename_document(&mut self, source_id: &str, new_title: &str) -> usize {
        let mut updated = 0;
        let mut had_title = false;

        for bucket in self.buckets.values_mut() {
            bucket.retain_mut(|entry| {
                if entry.source_id != source_id {
                    return true;
                }
                updated += 1;
                if entry.kind == EntryKind::Title {
                    had_title = true;
                    return false;
                }
                entry.source_title = new_title.to_string();
                true
            });
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());

        if had_title {
            let titles = DocumentMetadata {
                title: new_title.to_string(),
                aliases: self.aliases.get(source_id).cloned().unwrap_or_default(),
                ..Default::default()
            };
            for (key, entry) in titles.entries(source_id) {
                self.insert(&key, entry);
            }
        }

        updated
    }

    /// Move every entry of `old_id` to `new_id` without touching keys.
    pub fn relocate_document(&mut self, old_id: &str, new_id: &str) -> usize {
        if let Some(aliases) = self.aliases.remove(old_id) {
            self.aliases.insert(new_id.to_string(), aliases);
        }
        let mut updated = 0;
        for (key, bucket) in &mut self.buckets {
            for entry in bucket.iter_mut().filter(|e| e.source_id == old_id) {
                entry.source_id = new_id.to_string();
                updated += 1;
            }
            dedup_bucket(key, bucket);
        }
        updated
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.aliases.clear();
    }

    /// Entries stored under an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&[IndexEntry]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IndexEntry])> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Buckets whose key starts with `prefix`, in key order.
    pub fn prefixed<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [IndexEntry])> + 'a {
        self.buckets
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Entry counts per kind, in [`EntryKind::ALL`] order.
    pub fn counts_by_kind(&self) -> [(EntryKind, usize); 4] {
        EntryKind::ALL.map(|kind| {
            let n = self.buckets.values().flatten().filter(|e| e.kind == kind).count();
            (kind, n)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Keep the first entry for each identity after an in-place rewrite.
fn dedup_bucket(key: &str, bucket: &mut Vec<IndexEntry>) {
    let mut seen = Vec::with_capacity(bucket.len());
    let before = bucket.len();
    bucket.retain(|e| {
        let id = (e.kind, e.source_id.clone(), e.target.clone());
        if seen.contains(&id) {
            false
        } else {
            seen.push(id);
            true
        }
    });
    if bucket.len() != before {
        tracing::debug!(key, dropped = before - bucket.len(), "collapsed duplicate entries");
    }
}
