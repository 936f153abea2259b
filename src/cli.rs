//! CLI argument parsing and command handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::formatter::OutputFormatter;
use crate::index::Index;
use crate::models::SearchOptions;
use crate::query::QueryEngine;

/// Symdex: symbol-search index for generated reference documentation
#[derive(Parser, Debug)]
#[command(
    name = "sdx",
    version,
    about = "Query a documentation symbol-search index",
    long_about = "Symdex loads the symbol-search index produced by a documentation build \
                  and answers incremental-search queries against it: partial symbol names \
                  resolve to ranked candidates, with overloads and same-named members of \
                  different classes grouped and disambiguated by scope."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the index for keys containing a partial symbol name
    ///
    /// Matching is case-sensitive substring search over the stored keys,
    /// ranked by match position (prefix-like matches first) with ties kept
    /// in index order. Keys mapping to several declarations come back as
    /// one group with scope-qualified sub-rows.
    ///
    /// Examples:
    ///   sdx query pop                 # pop, pop_back, pop_front
    ///   sdx query pop --limit 2
    ///   sdx query pointer --json --pretty
    Query {
        /// Partial symbol name to search for
        pattern: String,

        /// Path to the index file
        #[arg(short, long, value_name = "PATH", default_value = "symdex.idx")]
        index: PathBuf,

        /// Maximum number of result groups
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,

        /// Disable colors and match highlighting
        #[arg(long)]
        plain: bool,
    },

    /// Look up the entries for one exact key
    Lookup {
        /// Exact search key (case-sensitive)
        key: String,

        /// Path to the index file
        #[arg(short, long, value_name = "PATH", default_value = "symdex.idx")]
        index: PathBuf,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// List every search key in index order
    Keys {
        /// Path to the index file
        #[arg(short, long, value_name = "PATH", default_value = "symdex.idx")]
        index: PathBuf,

        /// Output format as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show index statistics
    Stats {
        /// Path to the index file
        #[arg(short, long, value_name = "PATH", default_value = "symdex.idx")]
        index: PathBuf,

        /// Output format as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output (only with --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Validate an index file without querying it
    ///
    /// Exits non-zero when the index is structurally malformed, so build
    /// scripts can gate publishing on a loadable search index.
    Check {
        /// Path to the index file
        #[arg(short, long, value_name = "PATH", default_value = "symdex.idx")]
        index: PathBuf,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",   // Default: only warnings and errors
            1 => "info",   // -v: show info messages
            2 => "debug",  // -vv: show debug messages
            _ => "trace",  // -vvv: show trace messages
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        match self.command {
            Command::Query {
                pattern,
                index,
                limit,
                json,
                pretty,
                plain,
            } => handle_query(&pattern, &index, limit, json, pretty, plain),
            Command::Lookup {
                key,
                index,
                json,
                pretty,
                plain,
            } => handle_lookup(&key, &index, json, pretty, plain),
            Command::Keys { index, json } => handle_keys(&index, json),
            Command::Stats {
                index,
                json,
                pretty,
            } => handle_stats(&index, json, pretty),
            Command::Check { index } => handle_check(&index),
        }
    }
}

/// Load an index or fail with a user-actionable message
fn load_index(path: &Path) -> Result<Index> {
    Index::load(path)
        .with_context(|| format!("Search index unavailable: {}", path.display()))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output as JSON")
}

fn handle_query(
    pattern: &str,
    index_path: &Path,
    limit: Option<usize>,
    json: bool,
    pretty: bool,
    plain: bool,
) -> Result<()> {
    let index = load_index(index_path)?;
    let engine = QueryEngine::new(index);

    let groups = engine.search(pattern, &SearchOptions { limit });

    if json {
        println!("{}", to_json(&groups, pretty)?);
    } else {
        OutputFormatter::new(plain).format_groups(&groups, pattern.trim());
    }

    Ok(())
}

fn handle_lookup(
    key: &str,
    index_path: &Path,
    json: bool,
    pretty: bool,
    plain: bool,
) -> Result<()> {
    let index = load_index(index_path)?;
    let entries = index.lookup(key);

    if json {
        println!("{}", to_json(&entries, pretty)?);
    } else {
        OutputFormatter::new(plain).format_entries(key, entries);
    }

    Ok(())
}

fn handle_keys(index_path: &Path, json: bool) -> Result<()> {
    let index = load_index(index_path)?;

    if json {
        let keys: Vec<&str> = index.keys().collect();
        println!("{}", to_json(&keys, false)?);
    } else {
        for key in index.keys() {
            println!("{}", key);
        }
    }

    Ok(())
}

fn handle_stats(index_path: &Path, json: bool, pretty: bool) -> Result<()> {
    let index = load_index(index_path)?;
    let stats = index.stats();

    if json {
        println!("{}", to_json(&stats, pretty)?);
    } else {
        println!("Keys:            {}", stats.total_keys);
        println!("Entries:         {}", stats.total_entries);
        println!("Overloaded keys: {}", stats.overloaded_keys);
        if let Some(generated_at) = &stats.generated_at {
            println!("Generated at:    {}", generated_at);
        }
    }

    Ok(())
}

fn handle_check(index_path: &Path) -> Result<()> {
    let index = load_index(index_path)?;
    let stats = index.stats();

    println!(
        "Index OK: {} keys, {} entries",
        stats.total_keys, stats.total_entries
    );

    Ok(())
}
