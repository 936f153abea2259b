//! Index writer: serializes an index to its line-delimited persisted form
//!
//! Layout: a header line (magic, version, record count, generation
//! timestamp), one JSON record per line in store order, and a footer line
//! carrying a blake3 checksum of the record lines. The reader verifies the
//! magic, version, count, and checksum before handing out an index.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::index::Index;

/// Magic string identifying the persisted index format
pub const MAGIC: &str = "symdex";

/// Current persisted format version
pub const FORMAT_VERSION: u32 = 1;

/// First line of the persisted form
///
/// Unknown fields are tolerated on read, so future writers may extend the
/// header without breaking old readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderLine {
    pub magic: String,
    pub version: u32,
    /// Number of record lines that follow the header
    pub records: usize,
    /// RFC 3339 timestamp stamped at serialization time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// Final line of the persisted form
///
/// Optional on read: a missing footer is tolerated, a mismatching checksum
/// is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterLine {
    /// Hex-encoded blake3 hash of the record lines (each including its
    /// trailing newline)
    pub checksum: String,
}

/// Serialize an index to a file
pub fn write_index(index: &Index, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let file = File::create(path)
        .with_context(|| format!("Failed to create index file: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    serialize_index(index, &mut out)?;
    out.flush().context("Failed to flush index file")?;

    log::debug!("Wrote {} keys to {}", index.len(), path.display());

    Ok(())
}

/// Serialize an index to any writer
///
/// Round-trips losslessly through the reader: key order, entry order within
/// a key, and exact string content (including escaped markup characters)
/// are preserved.
pub fn serialize_index(index: &Index, out: &mut impl Write) -> Result<()> {
    let header = HeaderLine {
        magic: MAGIC.to_string(),
        version: FORMAT_VERSION,
        records: index.len(),
        generated_at: index
            .generated_at()
            .map(str::to_string)
            .or_else(|| Some(chrono::Utc::now().to_rfc3339())),
    };

    let header_json = serde_json::to_string(&header).context("Failed to serialize header")?;
    writeln!(out, "{}", header_json)?;

    let mut hasher = blake3::Hasher::new();
    for record in index.records() {
        let line = serde_json::to_string(record)
            .with_context(|| format!("Failed to serialize record for key '{}'", record.key))?;
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
        writeln!(out, "{}", line)?;
    }

    let footer = FooterLine {
        checksum: hasher.finalize().to_hex().to_string(),
    };
    let footer_json = serde_json::to_string(&footer).context("Failed to serialize footer")?;
    writeln!(out, "{}", footer_json)?;

    Ok(())
}
