//! Core data models for Symdex
//!
//! These structures represent the validated, deterministic shapes the index
//! store and query engine exchange: one record per search key, one entry per
//! concrete declaration, and grouped result rows ready for rendering.

use serde::{Deserialize, Serialize};

/// One concrete documented declaration of a symbol
///
/// Labels carry whatever qualifiers the documentation generator emitted to
/// tell overloads apart (parameter lists, `=default`, `noexcept` clauses),
/// including escaped markup characters. They are stored and passed through
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Display name of the declaration (e.g. `pop_back()`)
    pub label: String,
    /// Fully-qualified owning namespace/class path (e.g. `bit::stl::casts`).
    /// Empty for symbols documented at global scope.
    pub scope: String,
    /// Opaque document path plus intra-document anchor. Interpreted only by
    /// the external renderer, never by the core.
    pub location: String,
}

impl Entry {
    pub fn new(
        label: impl Into<String>,
        scope: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            scope: scope.into(),
            location: location.into(),
        }
    }

    /// Display form for disambiguated sub-rows: `scope::label`, or the bare
    /// label when the declaration has no owning scope.
    pub fn qualified_label(&self) -> String {
        if self.scope.is_empty() {
            self.label.clone()
        } else {
            format!("{}::{}", self.scope, self.label)
        }
    }
}

/// All declarations sharing one search key
///
/// Entries keep authoring order; they are never re-sorted. A record with an
/// empty entries list must never exist; the loader rejects one with
/// [`MalformedIndexError`](crate::index::MalformedIndexError).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexRecord {
    /// Normalized search key: the symbol's bare name, case-sensitive as
    /// authored
    pub key: String,
    /// Declarations for this key, in authoring order (length ≥ 1)
    pub entries: Vec<Entry>,
}

/// One row in a rendered result group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultRow {
    /// Display label: the entry's bare label for single-declaration keys,
    /// the scope-qualified form for overload sub-rows
    pub label: String,
    /// Location reference, passed through for the renderer
    pub location: String,
}

/// A ranked group of results for one matched key
///
/// Single-declaration keys produce one row labeled by the entry's label;
/// keys with several declarations produce a group titled by the key whose
/// sub-rows carry scope-qualified labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchGroup {
    /// The matched search key
    pub key: String,
    /// Byte offset of the first occurrence of the query in the key.
    /// Lower offsets rank higher.
    pub match_offset: usize,
    /// Result rows (length ≥ 1)
    pub rows: Vec<ResultRow>,
}

impl SearchGroup {
    /// Title to render for this group: the row's own label when the key has
    /// a single declaration, the key itself when it groups overloads
    pub fn title(&self) -> &str {
        if self.rows.len() == 1 {
            &self.rows[0].label
        } else {
            &self.key
        }
    }

    /// Whether this group carries more than one declaration
    pub fn is_overloaded(&self) -> bool {
        self.rows.len() > 1
    }
}

/// Options controlling search behavior
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of result groups (None = unlimited; the external UI
    /// may truncate further for display)
    pub limit: Option<usize>,
}

/// Statistics about a loaded index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of distinct search keys
    pub total_keys: usize,
    /// Number of declaration entries across all keys
    pub total_entries: usize,
    /// Keys mapping to more than one declaration
    pub overloaded_keys: usize,
    /// Generation timestamp from the index header, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}
