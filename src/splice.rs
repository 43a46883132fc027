//! Injecting the rendered table into an existing HTML page.
//!
//! The shell page is never parsed as HTML. Injection points are found by
//! exact text search for comment markers, so everything outside the
//! marker region survives byte-for-byte and re-running is idempotent.
//!
//! ## Injection Point Preference
//!
//! | Shell contains | Result |
//! |----------------|--------|
//! | start … end markers | text between the first end marker and the nearest start before it replaced |
//! | legacy marker | legacy marker replaced by the wrapped fragment |
//! | `</body>` (any case) | wrapped fragment inserted before the last `</body>` |
//! | none of these | wrapped fragment appended |
//!
//! "Wrapped" means `start\nfragment\nend`, so after the first run every
//! later run takes the first row of the table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BODY_CLOSE: &str = "</body>";

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Cannot read shell page {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write shell page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Literal comment tokens delimiting the generated region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub start: String,
    pub end: String,
    /// Single placeholder from shells written before start/end markers existed.
    pub legacy: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "<!-- TABLE_START -->".to_string(),
            end: "<!-- TABLE_END -->".to_string(),
            legacy: "<!-- TABLE_HERE -->".to_string(),
        }
    }
}

impl Markers {
    fn wrap(&self, fragment: &str) -> String {
        format!("{}\n{}\n{}", self.start, fragment, self.end)
    }
}

/// Which injection point [`splice`] used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceMode {
    Paired,
    Legacy,
    BeforeBody,
    Appended,
}

impl fmt::Display for SpliceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SpliceMode::Paired => "replaced between markers",
            SpliceMode::Legacy => "replaced legacy marker",
            SpliceMode::BeforeBody => "inserted before </body>",
            SpliceMode::Appended => "appended",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub page: String,
    pub mode: SpliceMode,
}

/// Byte range strictly between the innermost start/end pair.
///
/// The first end marker that has a start marker before it closes the pair,
/// and the nearest such start opens it. An orphan start marker earlier in
/// the page is therefore left alone along with whatever follows it.
fn find_pair(page: &str, markers: &Markers) -> Option<(usize, usize)> {
    page.match_indices(markers.end.as_str()).find_map(|(end_idx, _)| {
        let start_idx = page[..end_idx].rfind(markers.start.as_str())?;
        let after_start = start_idx + markers.start.len();
        (after_start <= end_idx).then_some((after_start, end_idx))
    })
}

/// Case-insensitive position of the last `</body>`.
fn find_body_close(page: &str) -> Option<usize> {
    page.to_ascii_lowercase().rfind(BODY_CLOSE)
}

/// Put `fragment` into `page` at the most preferred injection point available.
pub fn splice(page: &str, fragment: &str, markers: &Markers) -> Spliced {
    if let Some((after_start, end_idx)) = find_pair(page, markers) {
        let mut out = String::with_capacity(page.len() + fragment.len());
        out.push_str(&page[..after_start]);
        out.push('\n');
        out.push_str(fragment);
        out.push('\n');
        out.push_str(&page[end_idx..]);
        return Spliced {
            page: out,
            mode: SpliceMode::Paired,
        };
    }

    let wrapped = markers.wrap(fragment);

    if page.contains(&markers.legacy) {
        return Spliced {
            page: page.replacen(&markers.legacy, &wrapped, 1),
            mode: SpliceMode::Legacy,
        };
    }

    if let Some(body_idx) = find_body_close(page) {
        let mut out = String::with_capacity(page.len() + wrapped.len() + 1);
        out.push_str(&page[..body_idx]);
        out.push_str(&wrapped);
        out.push('\n');
        out.push_str(&page[body_idx..]);
        return Spliced {
            page: out,
            mode: SpliceMode::BeforeBody,
        };
    }

    let mut out = String::with_capacity(page.len() + wrapped.len() + 2);
    out.push_str(page);
    if !page.is_empty() && !page.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&wrapped);
    out.push('\n');
    Spliced {
        page: out,
        mode: SpliceMode::Appended,
    }
}

/// Splice `fragment` into the shell file at `path`, rewriting it in place.
pub fn splice_file(path: &Path, fragment: &str, markers: &Markers) -> Result<SpliceMode, SpliceError> {
    let page = fs::read_to_string(path).map_err(|source| SpliceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let spliced = splice(&page, fragment, markers);
    fs::write(path, spliced.page).map_err(|source| SpliceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(shell = %path.display(), mode = %spliced.mode, "spliced index table");
    Ok(spliced.mode)
}
