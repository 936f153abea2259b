//! Index reader: full deserialization and structural validation
//!
//! The persisted form is loaded in one pass; any structural violation is
//! fatal and surfaces as [`MalformedIndexError`]. The query engine must
//! never operate on a partially-valid index, so there is no best-effort
//! recovery here. The one tolerated anomaly is unknown fields, which are
//! ignored for forward compatibility.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::index::writer::{FooterLine, HeaderLine, FORMAT_VERSION, MAGIC};
use crate::index::Index;
use crate::models::IndexRecord;

/// Persisted index violates the data model's structural invariants
///
/// Fatal to startup: callers surface this as "search index unavailable"
/// rather than querying whatever half-parsed state exists.
#[derive(Debug, Error)]
pub enum MalformedIndexError {
    #[error("failed to read index: {0}")]
    Io(#[from] std::io::Error),

    #[error("index file is empty (missing header line)")]
    MissingHeader,

    #[error("invalid header line: {0}")]
    InvalidHeader(String),

    #[error("not a symbol index (expected magic '{expected}', found '{found}')")]
    WrongMagic { expected: &'static str, found: String },

    #[error("unsupported index format version {0}")]
    UnsupportedVersion(u32),

    #[error("line {line}: invalid record: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("invalid search key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("line {line}: key {key:?} has an empty entries list")]
    EmptyEntries { line: usize, key: String },

    #[error("line {line}: duplicate key {key:?} with conflicting entries")]
    DuplicateKey { line: usize, key: String },

    #[error("record count mismatch: header declares {expected}, found {found}")]
    RecordCountMismatch { expected: usize, found: usize },

    #[error("line {line}: invalid footer line: {message}")]
    InvalidFooter { line: usize, message: String },

    #[error("checksum mismatch (index file is corrupt)")]
    ChecksumMismatch,

    #[error("line {line}: unexpected data after footer")]
    TrailingData { line: usize },
}

/// Load and validate an index file
pub fn read_index(path: impl AsRef<Path>) -> Result<Index, MalformedIndexError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let index = parse_index(BufReader::new(file))?;

    log::debug!("Loaded index from {}: {} keys", path.display(), index.len());

    Ok(index)
}

/// Parse an index from any buffered reader
pub fn parse_index(input: impl BufRead) -> Result<Index, MalformedIndexError> {
    let mut lines = input.lines();

    let header_line = lines.next().ok_or(MalformedIndexError::MissingHeader)??;
    let header: HeaderLine = serde_json::from_str(&header_line)
        .map_err(|e| MalformedIndexError::InvalidHeader(e.to_string()))?;

    if header.magic != MAGIC {
        return Err(MalformedIndexError::WrongMagic {
            expected: MAGIC,
            found: header.magic,
        });
    }
    if header.version != FORMAT_VERSION {
        return Err(MalformedIndexError::UnsupportedVersion(header.version));
    }

    let mut index = Index::new();
    index.generated_at = header.generated_at;

    let mut hasher = blake3::Hasher::new();
    let mut line_no = 1;
    let mut seen = 0;

    while seen < header.records {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(MalformedIndexError::RecordCountMismatch {
                    expected: header.records,
                    found: seen,
                });
            }
        };
        line_no += 1;

        hasher.update(line.as_bytes());
        hasher.update(b"\n");

        let record: IndexRecord =
            serde_json::from_str(&line).map_err(|e| MalformedIndexError::InvalidRecord {
                line: line_no,
                message: e.to_string(),
            })?;

        if let Err(reason) = super::validate_key(&record.key) {
            return Err(MalformedIndexError::InvalidRecord {
                line: line_no,
                message: format!("invalid key {:?}: {}", record.key, reason),
            });
        }
        if record.entries.is_empty() {
            return Err(MalformedIndexError::EmptyEntries {
                line: line_no,
                key: record.key,
            });
        }

        match index.by_key.get(&record.key) {
            Some(&slot) => {
                // A byte-identical re-statement of an earlier record merges
                // idempotently; anything else conflicts.
                if index.records[slot].entries == record.entries {
                    log::warn!(
                        "duplicate record for key '{}' with identical content, merged",
                        record.key
                    );
                } else {
                    return Err(MalformedIndexError::DuplicateKey {
                        line: line_no,
                        key: record.key,
                    });
                }
            }
            None => {
                index.by_key.insert(record.key.clone(), index.records.len());
                index.records.push(record);
            }
        }

        seen += 1;
    }

    // Optional checksum footer, then nothing but blank lines
    if let Some(line) = lines.next() {
        let line = line?;
        line_no += 1;

        let footer: FooterLine =
            serde_json::from_str(&line).map_err(|e| MalformedIndexError::InvalidFooter {
                line: line_no,
                message: e.to_string(),
            })?;

        if footer.checksum != hasher.finalize().to_hex().to_string() {
            return Err(MalformedIndexError::ChecksumMismatch);
        }

        for trailing in lines {
            let trailing = trailing?;
            line_no += 1;
            if !trailing.trim().is_empty() {
                return Err(MalformedIndexError::TrailingData { line: line_no });
            }
        }
    } else {
        log::debug!("index has no checksum footer, skipping verification");
    }

    Ok(index)
}
