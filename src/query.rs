//! Query engine for searching the symbol index
//!
//! The engine owns a frozen index and turns a user-typed partial symbol
//! name into ranked, grouped results. Matching is a plain substring scan
//! over the stored keys. The index is small enough that a linear pass
//! completes in microseconds, and a scan in store order makes the ranking
//! tie-break fall out of sort stability.

use crate::index::Index;
use crate::models::{IndexRecord, ResultRow, SearchGroup, SearchOptions};

/// Executes searches against a loaded, immutable index
///
/// `search` is a pure function of its inputs: no I/O, no shared mutable
/// state, no suspension points. Each invocation accumulates into its own
/// local result vector, so a stale in-flight search from a superseded
/// keystroke is discarded by simply ignoring its return value.
pub struct QueryEngine {
    index: Index,
}

impl QueryEngine {
    /// Create a query engine over a loaded index
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    /// Borrow the underlying index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Execute a query and return ranked result groups
    ///
    /// The query is normalized only by trimming surrounding whitespace
    /// (no case folding, no stemming; keys are case-sensitive identifiers). A
    /// key matches when the query occurs anywhere inside it (substring, not
    /// merely prefix). Matches rank by the first occurrence offset, ties
    /// broken by store order, so prefix-like matches surface first without
    /// requiring a strict prefix.
    ///
    /// An empty query and a query matching nothing both return an empty
    /// vector; `search` never fails on well-formed input.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchGroup> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut groups: Vec<SearchGroup> = self
            .index
            .records()
            .iter()
            .filter_map(|record| {
                record
                    .key
                    .find(query)
                    .map(|offset| build_group(record, offset))
            })
            .collect();

        // Stable sort over a store-order scan: equal offsets keep their
        // original index order.
        groups.sort_by_key(|g| g.match_offset);

        if let Some(limit) = options.limit {
            groups.truncate(limit);
        }

        log::debug!("query '{}' matched {} keys", query, groups.len());

        groups
    }
}

/// Build the display group for one matched record
///
/// A single-declaration key renders as one row under the entry's own label.
/// A key with several declarations renders as a group titled by the key,
/// with each entry disambiguated by its scope-qualified label.
fn build_group(record: &IndexRecord, offset: usize) -> SearchGroup {
    let rows = if record.entries.len() == 1 {
        vec![ResultRow {
            label: record.entries[0].label.clone(),
            location: record.entries[0].location.clone(),
        }]
    } else {
        record
            .entries
            .iter()
            .map(|entry| ResultRow {
                label: entry.qualified_label(),
                location: entry.location.clone(),
            })
            .collect()
    };

    SearchGroup {
        key: record.key.clone(),
        match_offset: offset,
        rows,
    }
}
