//! The full run: load → detail pages → index table → splice.
//!
//! Paths in [`SiteConfig`] are joined onto a caller-supplied root (the
//! working directory for the CLI, a temp dir in tests). Links written into
//! HTML use the configured relative paths, never the root.

use crate::config::SiteConfig;
use crate::detail::{self, DetailError, DetailOptions, PlannedPage, WrittenPage};
use crate::index::render_index;
use crate::splice::{SpliceError, SpliceMode, splice_file};
use crate::table::{Table, TableError, load_table};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Detail(#[from] DetailError),
    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// CSV path as configured.
    pub input: String,
    /// Shell path as configured.
    pub shell: String,
    pub pages_dir: String,
    pub rows: usize,
    pub distinct_titles: usize,
    /// Detail pages in row order.
    pub pages: Vec<WrittenPage>,
    pub splice_mode: SpliceMode,
}

/// What a build would produce, computed without writing anything.
#[derive(Debug, Clone)]
pub struct CheckSummary {
    pub input: String,
    pub columns: Vec<String>,
    pub pages_dir: String,
    pub planned: Vec<PlannedPage>,
    /// Whether the link column exists in the header.
    pub link_column_found: bool,
}

fn load(root: &Path, config: &SiteConfig) -> Result<Table, TableError> {
    load_table(&root.join(&config.input), config.rows.ragged)
}

/// Run every stage, writing detail pages and rewriting the shell.
pub fn build(root: &Path, config: &SiteConfig) -> Result<BuildSummary, BuildError> {
    let table = load(root, config)?;
    info!(input = %config.input, rows = table.rows.len(), "loaded CSV");

    let pages_dir = Path::new(&config.pages_dir);
    let options = DetailOptions {
        output_dir: root.join(pages_dir),
        link_prefix: detail::path_to_href(pages_dir).unwrap_or_else(|| config.pages_dir.clone()),
        title_column: config.columns.title.clone(),
        back_href: detail::back_href(pages_dir, Path::new(&config.shell)),
    };
    let written = detail::write_detail_pages(&table, &options)?;
    info!(
        pages = written.pages.len(),
        dir = %options.output_dir.display(),
        "wrote detail pages"
    );

    let fragment = render_index(&table, &written.links, &config.columns.link);
    let splice_mode = splice_file(
        &root.join(&config.shell),
        &fragment.into_string(),
        &config.markers,
    )?;
    info!(shell = %config.shell, mode = %splice_mode, "updated index page");

    Ok(BuildSummary {
        input: config.input.clone(),
        shell: config.shell.clone(),
        pages_dir: config.pages_dir.clone(),
        rows: table.rows.len(),
        distinct_titles: written.links.len(),
        pages: written.pages,
        splice_mode,
    })
}

/// Load the CSV and plan the detail pages without touching the output.
pub fn check(root: &Path, config: &SiteConfig) -> Result<CheckSummary, BuildError> {
    let table = load(root, config)?;
    let planned = detail::plan_pages(&table, &config.columns.title);
    let link_column_found = table.columns.iter().any(|c| *c == config.columns.link);
    Ok(CheckSummary {
        input: config.input.clone(),
        pages_dir: config.pages_dir.clone(),
        link_column_found,
        columns: table.columns,
        planned,
    })
}
