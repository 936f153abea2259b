//! Terminal output formatting for search results
//!
//! Renders ranked result groups for human eyes: single-declaration matches
//! as one line, overloaded keys as a header with indented, scope-qualified
//! sub-rows. Color and match highlighting are applied only when stdout is a
//! TTY and neither `NO_COLOR` nor `--plain` asked for plain text.

use std::io::{self, IsTerminal};

use owo_colors::OwoColorize;

use crate::models::{Entry, SearchGroup};

/// Output formatter configuration
pub struct OutputFormatter {
    /// Whether to use colors and match highlighting
    pub use_colors: bool,
}

impl OutputFormatter {
    /// Create a new formatter with automatic TTY detection
    pub fn new(plain: bool) -> Self {
        let is_tty = io::stdout().is_terminal();
        let no_color = std::env::var("NO_COLOR").is_ok();

        Self {
            use_colors: !plain && !no_color && is_tty,
        }
    }

    /// Format and print ranked search groups to stdout
    pub fn format_groups(&self, groups: &[SearchGroup], query: &str) {
        if groups.is_empty() {
            println!("No results found.");
            return;
        }

        for group in groups {
            if group.is_overloaded() {
                let count = format!("({} declarations)", group.rows.len());
                if self.use_colors {
                    println!(
                        "{} {}",
                        self.highlight_match(&group.key, query),
                        count.dimmed()
                    );
                } else {
                    println!("{} {}", group.key, count);
                }
                for row in &group.rows {
                    if self.use_colors {
                        println!("  {}  {}", row.label, row.location.dimmed());
                    } else {
                        println!("  {}  {}", row.label, row.location);
                    }
                }
            } else {
                let row = &group.rows[0];
                if self.use_colors {
                    println!(
                        "{}  {}",
                        self.highlight_match(&row.label, query),
                        row.location.dimmed()
                    );
                } else {
                    println!("{}  {}", row.label, row.location);
                }
            }
        }

        let summary = format!(
            "{} result{}",
            groups.len(),
            if groups.len() == 1 { "" } else { "s" }
        );
        if self.use_colors {
            println!("\n{}", summary.dimmed());
        } else {
            println!("\n{}", summary);
        }
    }

    /// Format and print the entries for one exact key
    pub fn format_entries(&self, key: &str, entries: &[Entry]) {
        if entries.is_empty() {
            println!("No entries for key '{}'.", key);
            return;
        }

        if self.use_colors {
            println!("{} {}", key.bold(), format!("({} entries)", entries.len()).dimmed());
        } else {
            println!("{} ({} entries)", key, entries.len());
        }
        for entry in entries {
            if self.use_colors {
                println!("  {}  {}", entry.qualified_label(), entry.location.dimmed());
            } else {
                println!("  {}  {}", entry.qualified_label(), entry.location);
            }
        }
    }

    /// Bold the first occurrence of the query inside a label
    fn highlight_match(&self, text: &str, query: &str) -> String {
        match text.find(query) {
            Some(pos) => {
                let (head, rest) = text.split_at(pos);
                let (matched, tail) = rest.split_at(query.len());
                format!("{}{}{}", head, matched.bold().green(), tail)
            }
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter_disables_colors() {
        let formatter = OutputFormatter::new(true);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_highlight_passthrough_without_match() {
        let formatter = OutputFormatter {
            use_colors: true,
        };
        assert_eq!(formatter.highlight_match("push", "pop"), "push");
    }
}
