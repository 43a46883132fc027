//! Shared test utilities for the csv-pages test suite.
//!
//! Provides in-memory table builders, a scratch project layout on disk, and
//! lookups that panic with a useful message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = setup_project(SAMPLE_CSV, SHELL_WITH_MARKERS);
//! let summary = build(project.path(), &SiteConfig::default()).unwrap();
//!
//! let page = read_detail_page(project.path(), "quicksort.html");
//! assert!(page.contains("<h1>Quicksort</h1>"));
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::detail::WrittenPage;
use crate::table::{RaggedRows, Table, parse_table};

// =========================================================================
// Fixtures
// =========================================================================

pub const SAMPLE_CSV: &str = "\
Algorithm,Category,Complexity
Quicksort,Sorting,O(n log n)
Dijkstra,Graphs,O(E + V log V)
Binary Search,Searching,O(log n)
";

pub const SHELL_WITH_MARKERS: &str = "\
<!DOCTYPE html>
<html>
<head><title>Algorithms</title></head>
<body>
<h1>Algorithms</h1>
<!-- TABLE_START -->
<p>stale</p>
<!-- TABLE_END -->
<footer>kept</footer>
</body>
</html>
";

pub const LEGACY_SHELL: &str = "\
<html>
<body>
<!-- TABLE_HERE -->
</body>
</html>
";

/// Parse CSV text into a table, padding ragged rows.
pub fn table(csv: &str) -> Table {
    parse_table("test.csv", csv.as_bytes(), RaggedRows::Pad).unwrap()
}

/// Create a temp directory holding `algorithms_tracker.csv` and `index.html`,
/// matching the default config layout.
pub fn setup_project(csv: &str, shell: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("algorithms_tracker.csv"), csv).unwrap();
    fs::write(tmp.path().join("index.html"), shell).unwrap();
    tmp
}

// =========================================================================
// Lookups — panics with a clear message on miss
// =========================================================================

/// Read a generated detail page from `<root>/pages/`. Panics if missing.
pub fn read_detail_page(root: &Path, file_name: &str) -> String {
    let path = root.join("pages").join(file_name);
    fs::read_to_string(&path).unwrap_or_else(|e| {
        let present = detail_file_names(root);
        panic!("detail page {file_name} not readable ({e}). Present: {present:?}")
    })
}

/// Sorted file names under `<root>/pages/`.
pub fn detail_file_names(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root.join("pages"))
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// File names of written pages in row order.
pub fn written_file_names(pages: &[WrittenPage]) -> Vec<&str> {
    pages.iter().map(|p| p.file_name.as_str()).collect()
}
