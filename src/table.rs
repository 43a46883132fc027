//! CSV loading.
//!
//! The first record of the file is the header row; every later record is a
//! data row, kept in file order. Cells are stored exactly as the `csv`
//! crate decodes them (quotes removed, no trimming).
//!
//! ## Ragged Rows
//!
//! A record whose width differs from the header is handled according to
//! [`RaggedRows`]:
//!
//! ```text
//! Algorithm,Category,Year
//! Quicksort,Sorting          ← pad: becomes ["Quicksort", "Sorting", ""]
//! BFS,Graphs,1945,extra      ← pad: becomes ["BFS", "Graphs", "1945"]
//! ```
//!
//! After loading, every row has exactly `columns.len()` cells.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Cannot read CSV file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV source {0} has no header row")]
    MissingHeader(String),
    #[error("Line {line} has {found} fields, expected {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// What to do with a data record whose width differs from the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRows {
    /// Pad short rows with empty cells, truncate long ones.
    #[default]
    Pad,
    /// Fail the load.
    Reject,
}

/// A CSV file held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Where the table came from (the path as given).
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One row viewed as column name → cell.
#[derive(Debug, Clone, Copy)]
pub struct RowRecord<'a> {
    columns: &'a [String],
    cells: &'a [String],
}

impl<'a> RowRecord<'a> {
    /// Cell under `column`. The first matching header wins when names repeat.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
    }

    /// `(label, value)` pairs in column order.
    pub fn fields(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.columns
            .iter()
            .zip(self.cells.iter())
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }
}

impl Table {
    pub fn record(&self, row: usize) -> Option<RowRecord<'_>> {
        self.rows.get(row).map(|cells| RowRecord {
            columns: &self.columns,
            cells,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = RowRecord<'_>> {
        self.rows.iter().map(|cells| RowRecord {
            columns: &self.columns,
            cells,
        })
    }
}

/// Load a CSV file from disk.
pub fn load_table(path: &Path, ragged: RaggedRows) -> Result<Table, TableError> {
    let file = File::open(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&path.display().to_string(), file, ragged)
}

/// Parse CSV from any reader. `name` is recorded as the table's name.
pub fn parse_table<R: Read>(name: &str, reader: R, ragged: RaggedRows) -> Result<Table, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let columns: Vec<String> = match records.next() {
        Some(header) => header?.iter().map(str::to_string).collect(),
        None => return Err(TableError::MissingHeader(name.to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.len() != columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            match ragged {
                RaggedRows::Reject => {
                    return Err(TableError::RaggedRow {
                        line,
                        expected: columns.len(),
                        found: cells.len(),
                    });
                }
                RaggedRows::Pad => {
                    warn!(
                        source = name,
                        line,
                        expected = columns.len(),
                        found = cells.len(),
                        "ragged row, fitting to header width"
                    );
                    cells.resize(columns.len(), String::new());
                }
            }
        }
        rows.push(cells);
    }

    debug!(
        source = name,
        columns = columns.len(),
        rows = rows.len(),
        "loaded table"
    );
    Ok(Table {
        name: name.to_string(),
        columns,
        rows,
    })
}
