//! In-memory symbol index with exact-key lookup
//!
//! The index holds records in stored (authoring) order alongside a key →
//! slot map for O(1) exact lookup. It is built once, offline, then frozen:
//! the query engine only ever borrows it immutably, so concurrent searches
//! over a shared index need no locking.

pub mod reader;
pub mod writer;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::models::{Entry, IndexRecord, IndexStats};

pub use reader::MalformedIndexError;

/// The full mapping from symbol key to its declaration entries
///
/// Records keep insertion order; `by_key` maps each key to its slot in
/// `records`, the same ordered-slab-plus-name-map shape the on-disk form
/// round-trips through.
#[derive(Debug, Clone)]
pub struct Index {
    records: Vec<IndexRecord>,
    by_key: HashMap<String, usize>,
    generated_at: Option<String>,
}

impl Index {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            by_key: HashMap::new(),
            generated_at: None,
        }
    }

    /// Add one declaration entry under a search key
    ///
    /// Re-adding an existing key merges into its entries sequence rather
    /// than creating a duplicate record. An entry identical to one already
    /// present under the key is a no-op, so insertion is idempotent;
    /// distinct entries that happen to share a location are kept (two
    /// overloads documented on the same anchor are legitimate).
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: Entry,
    ) -> Result<(), MalformedIndexError> {
        let key = key.into();
        if let Err(reason) = validate_key(&key) {
            return Err(MalformedIndexError::InvalidKey { key, reason });
        }

        match self.by_key.get(&key) {
            Some(&slot) => {
                let record = &mut self.records[slot];
                if !record.entries.contains(&entry) {
                    record.entries.push(entry);
                }
            }
            None => {
                self.by_key.insert(key.clone(), self.records.len());
                self.records.push(IndexRecord {
                    key,
                    entries: vec![entry],
                });
            }
        }

        Ok(())
    }

    /// Exact-key lookup
    ///
    /// Returns the entries sequence for `key` in original order, or an
    /// empty slice (not an error) when the key is absent.
    pub fn lookup(&self, key: &str) -> &[Entry] {
        match self.by_key.get(key) {
            Some(&slot) => &self.records[slot].entries,
            None => &[],
        }
    }

    /// All keys in stored (authoring) order
    ///
    /// The iterator is lazy, finite, and restartable; call again to rescan.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// All records in stored order
    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Generation timestamp from the persisted header, when present
    pub fn generated_at(&self) -> Option<&str> {
        self.generated_at.as_deref()
    }

    /// Stamp the generation timestamp serialized into the header
    pub fn set_generated_at(&mut self, timestamp: impl Into<String>) {
        self.generated_at = Some(timestamp.into());
    }

    /// Compute index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_keys: self.records.len(),
            total_entries: self.records.iter().map(|r| r.entries.len()).sum(),
            overloaded_keys: self.records.iter().filter(|r| r.entries.len() > 1).count(),
            generated_at: self.generated_at.clone(),
        }
    }

    /// Load an index from its persisted form
    ///
    /// The file is deserialized in full; there are no partial or
    /// incremental loads. Any structural violation fails with
    /// [`MalformedIndexError`] and the caller must treat the index as
    /// unavailable rather than query a partially-valid one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MalformedIndexError> {
        reader::read_index(path)
    }

    /// Serialize the index to its persisted form
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        writer::write_index(self, path)
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the key invariants: non-empty, no record separator
fn validate_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("key is empty");
    }
    if key.contains('\n') {
        return Err("key contains a record separator");
    }
    Ok(())
}
