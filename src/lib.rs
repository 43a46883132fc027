//! # csv-pages
//!
//! Turns a CSV file into a small static site: a master index table spliced
//! into an existing HTML page, plus one detail page per row, linked
//! together.
//!
//! # Architecture: One Linear Run
//!
//! ```text
//! 1. Load     algorithms_tracker.csv  →  Table
//! 2. Detail   Table                   →  pages/*.html + LinkMap
//! 3. Index    Table + LinkMap         →  <table> fragment
//! 4. Splice   fragment                →  index.html (rewritten in place)
//! ```
//!
//! Everything is regenerated on every run; there is no incremental state.
//! Concurrent runs against the same output directory are not supported.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`table`] | CSV loading, row records, ragged-row policy |
//! | [`slug`] | Title → file-name slug, collision numbering |
//! | [`detail`] | Per-row HTML pages and the title → href link map |
//! | [`index`] | Index table fragment with linked title cells |
//! | [`splice`] | Marker-based injection into the shell page |
//! | [`pipeline`] | Runs the stages in order for the CLI |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud for HTML
//!
//! Pages and the index fragment are built with [Maud](https://maud.lambda.xyz/).
//! All interpolation is auto-escaped, so a title like `<b>A&B</b>` can never
//! inject markup into either the detail page or the index.
//!
//! ## Text Markers, Not DOM Merging
//!
//! The shell page is treated as opaque text. The table lives between two
//! comment markers, which keeps everything else in the file byte-identical
//! across runs. See [`splice`] for the fallback order on shells without
//! markers.

pub mod config;
pub mod detail;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod slug;
pub mod splice;
pub mod table;

#[cfg(test)]
pub(crate) mod test_helpers;
