//! Per-row detail pages.
//!
//! Each data row becomes a standalone HTML document listing every field as
//! a label/value pair. Pages are named after the row's title (see
//! [`crate::slug`]) and written into the pages directory:
//!
//! ```text
//! pages/
//! ├── quicksort.html
//! ├── quicksort-2.html     # second row titled "Quicksort"
//! └── binary-search.html
//! ```
//!
//! The returned [`LinkMap`] tells the index renderer where each title's
//! page lives. Existing files with the same name are overwritten.

use crate::slug::{SlugAllocator, slugify};
use crate::table::{RowRecord, Table};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Title used when the title column is missing from a row's record.
pub const FALLBACK_TITLE: &str = "Algorithm";

const CSS: &str = include_str!("../static/detail.css");

#[derive(Error, Debug)]
pub enum DetailError {
    #[error("Cannot create pages directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write detail page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where and how detail pages are written.
#[derive(Debug, Clone)]
pub struct DetailOptions {
    /// Directory the files are written into.
    pub output_dir: PathBuf,
    /// Prefix for hrefs in the link map, e.g. `pages`.
    pub link_prefix: String,
    /// Column naming each page.
    pub title_column: String,
    /// Href from a detail page back to the index page.
    pub back_href: Option<String>,
}

/// Title → detail page href, built once per run.
///
/// Keyed lookups follow last-write-wins for duplicate titles. The per-row
/// list keeps every row's own href so repeated titles can still be linked
/// to their distinct pages.
#[derive(Debug, Clone, Default)]
pub struct LinkMap {
    by_title: HashMap<String, String>,
    rows: Vec<RowLink>,
}

#[derive(Debug, Clone)]
struct RowLink {
    title: String,
    href: String,
}

impl LinkMap {
    /// Record the page written for the next row.
    pub fn insert(&mut self, title: &str, href: &str) {
        self.by_title.insert(title.to_string(), href.to_string());
        self.rows.push(RowLink {
            title: title.to_string(),
            href: href.to_string(),
        });
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.by_title.get(title).map(String::as_str)
    }

    /// Href for `value` appearing in row `row`: the row's own page when it
    /// was written under that title, otherwise the keyed lookup.
    pub fn href_for_row(&self, row: usize, value: &str) -> Option<&str> {
        match self.rows.get(row) {
            Some(link) if link.title == value => Some(link.href.as_str()),
            _ => self.get(value),
        }
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

/// A page that will be (or was) written for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage {
    pub title: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPage {
    pub title: String,
    pub file_name: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct DetailPages {
    pub links: LinkMap,
    pub pages: Vec<WrittenPage>,
}

/// Row title: the title column's cell, or [`FALLBACK_TITLE`] when absent.
pub fn row_title<'a>(record: &RowRecord<'a>, title_column: &str) -> &'a str {
    record.get(title_column).unwrap_or(FALLBACK_TITLE)
}

/// Work out titles and file names for every row without touching disk.
pub fn plan_pages(table: &Table, title_column: &str) -> Vec<PlannedPage> {
    let mut slugs = SlugAllocator::new();
    table
        .records()
        .map(|record| {
            let title = row_title(&record, title_column);
            let stem = slugs.allocate(&slugify(title));
            PlannedPage {
                title: title.to_string(),
                file_name: format!("{stem}.html"),
            }
        })
        .collect()
}

/// Write one page per row and return the links to them.
pub fn write_detail_pages(
    table: &Table,
    options: &DetailOptions,
) -> Result<DetailPages, DetailError> {
    fs::create_dir_all(&options.output_dir).map_err(|source| DetailError::CreateDir {
        path: options.output_dir.clone(),
        source,
    })?;

    let plan = plan_pages(table, &options.title_column);
    let mut links = LinkMap::default();
    let mut pages = Vec::with_capacity(plan.len());

    for (record, planned) in table.records().zip(plan) {
        let html = render_detail_page(&planned.title, record, options.back_href.as_deref());
        let path = options.output_dir.join(&planned.file_name);
        fs::write(&path, html.into_string()).map_err(|source| DetailError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), title = %planned.title, "wrote detail page");

        let href = join_href(&options.link_prefix, &planned.file_name);
        links.insert(&planned.title, &href);
        pages.push(WrittenPage {
            title: planned.title,
            file_name: planned.file_name,
            href,
        });
    }

    Ok(DetailPages { links, pages })
}

fn join_href(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{prefix}/{file_name}")
    }
}

/// Turn a relative filesystem path into an href with `/` separators.
///
/// Returns `None` for absolute paths or paths that climb with `..`, which
/// cannot be expressed as a link from inside the site.
pub fn path_to_href(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

/// Href from a page inside `pages_dir` back to `shell`, both relative to
/// the same root.
pub fn back_href(pages_dir: &Path, shell: &Path) -> Option<String> {
    let depth = path_to_href(pages_dir)?
        .split('/')
        .filter(|p| !p.is_empty())
        .count();
    let shell = path_to_href(shell)?;
    if shell.is_empty() {
        return None;
    }
    Some(format!("{}{}", "../".repeat(depth), shell))
}

fn render_detail_page(title: &str, record: RowRecord<'_>, back_href: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                @if let Some(href) = back_href {
                    nav.back {
                        a href=(href) { "← Back to index" }
                    }
                }
                main.detail-page {
                    h1 { (title) }
                    dl.fields {
                        @for (label, value) in record.fields() {
                            dt { (label) }
                            dd { (value) }
                        }
                    }
                }
            }
        }
    }
}
