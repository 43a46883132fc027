//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout. Diagnostics go
//! through `tracing` on stderr instead.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages → pages/
//!     001 Quicksort → quicksort.html
//!     002 Quicksort → quicksort-2.html
//! Index: 2 rows, 1 distinct title → index.html (replaced between markers)
//! Table inserted into index.html
//! ```
//!
//! ## Check
//!
//! ```text
//! Table algorithms_tracker.csv (2 rows)
//! Columns
//!     001 Algorithm
//!     002 Category
//! Pages → pages/
//!     001 Quicksort → quicksort.html
//!     002 Quicksort → quicksort-2.html
//! ```

use crate::pipeline::{BuildSummary, CheckSummary};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn page_line(pos: usize, title: &str, file_name: &str) -> String {
    let title = if title.is_empty() { "(empty title)" } else { title };
    format!("{}{} {} → {}", indent(1), format_index(pos), title, file_name)
}

fn dir_label(dir: &str) -> String {
    format!("{}/", dir.trim_end_matches('/'))
}

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![format!("Pages → {}", dir_label(&summary.pages_dir))];
    for (i, page) in summary.pages.iter().enumerate() {
        lines.push(page_line(i + 1, &page.title, &page.file_name));
    }
    lines.push(format!(
        "Index: {}, {} → {} ({})",
        plural(summary.rows, "row"),
        plural(summary.distinct_titles, "distinct title"),
        summary.shell,
        summary.splice_mode
    ));
    lines.push(format!("Table inserted into {}", summary.shell));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

pub fn format_check_output(summary: &CheckSummary, link_column: &str) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Table {} ({})",
            summary.input,
            plural(summary.planned.len(), "row")
        ),
        "Columns".to_string(),
    ];
    for (i, column) in summary.columns.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), column));
    }
    if !summary.link_column_found {
        lines.push(format!(
            "{}Link column '{}' not found, index will have no links",
            indent(1),
            link_column
        ));
    }
    lines.push(format!("Pages → {}", dir_label(&summary.pages_dir)));
    for (i, page) in summary.planned.iter().enumerate() {
        lines.push(page_line(i + 1, &page.title, &page.file_name));
    }
    lines
}

pub fn print_check_output(summary: &CheckSummary, link_column: &str) {
    for line in format_check_output(summary, link_column) {
        println!("{}", line);
    }
}
