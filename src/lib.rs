//! Symdex: symbol-search index and query engine for generated reference docs
//!
//! Symdex is the search backend of a documentation site: a static,
//! offline-built table mapping API symbol names to the places they are
//! documented, plus the engine that answers incremental-search queries
//! against it. Given a partial symbol name it returns ranked candidates,
//! grouping and scope-qualifying the entries when one name maps to several
//! declarations (overloads, constructors, same-named members of different
//! classes).
//!
//! # Architecture
//!
//! - **Index store**: immutable mapping from search key to its declaration
//!   entries; persisted as line-delimited JSON with a checksummed footer,
//!   loaded in full at startup
//! - **Query engine**: pure substring scan over the stored keys, ranked by
//!   match position and grouped for display
//!
//! The build tool that extracts symbols and the UI that renders results are
//! external collaborators: Symdex only loads, validates, and queries.
//!
//! # Example Usage
//!
//! ```no_run
//! use symdex::{Index, QueryEngine, SearchOptions};
//!
//! let index = Index::load("symdex.idx").unwrap();
//! let engine = QueryEngine::new(index);
//!
//! let groups = engine.search("pop", &SearchOptions::default());
//! for group in &groups {
//!     println!("{} ({} declarations)", group.title(), group.rows.len());
//! }
//! ```

pub mod cli;
pub mod formatter;
pub mod index;
pub mod models;
pub mod output;
pub mod query;

// Re-export commonly used types
pub use index::{Index, MalformedIndexError};
pub use models::{Entry, IndexRecord, IndexStats, ResultRow, SearchGroup, SearchOptions};
pub use query::QueryEngine;
