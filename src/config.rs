//! Run configuration.
//!
//! Handles loading and validating `config.toml`. Every value has a
//! default reproducing the classic layout (CSV, shell and pages directory
//! side by side in the working directory), so the file is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input = "algorithms_tracker.csv"  # CSV source, first record = headers
//! shell = "index.html"              # Existing page receiving the index table
//! pages_dir = "pages"               # Where detail pages are written
//!
//! [columns]
//! title = "Algorithm"               # Names each detail page
//! link = "Algorithm"                # Index column turned into links
//!
//! [markers]
//! start = "<!-- TABLE_START -->"
//! end = "<!-- TABLE_END -->"
//! legacy = "<!-- TABLE_HERE -->"
//!
//! [rows]
//! ragged = "pad"                    # "pad" or "reject"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! input = "data/sorting.csv"
//!
//! [columns]
//! title = "Name"
//! link = "Name"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Paths are resolved
//! against the directory the program runs in, not the config directory.

use crate::splice::Markers;
use crate::table::RaggedRows;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// CSV file to read.
    pub input: String,
    /// HTML shell the index table is spliced into, rewritten in place.
    pub shell: String,
    /// Directory receiving one page per row. Also the href prefix of links.
    pub pages_dir: String,
    /// Which columns carry titles and links.
    pub columns: ColumnsConfig,
    /// Injection markers in the shell.
    pub markers: Markers,
    /// Ragged row handling.
    pub rows: RowsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            input: "algorithms_tracker.csv".to_string(),
            shell: "index.html".to_string(),
            pages_dir: "pages".to_string(),
            columns: ColumnsConfig::default(),
            markers: Markers::default(),
            rows: RowsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reject values that would make the run meaningless or non-idempotent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("input", &self.input),
            ("shell", &self.shell),
            ("pages_dir", &self.pages_dir),
            ("columns.title", &self.columns.title),
            ("columns.link", &self.columns.link),
            ("markers.start", &self.markers.start),
            ("markers.end", &self.markers.end),
            ("markers.legacy", &self.markers.legacy),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.markers.start == self.markers.end {
            return Err(ConfigError::Validation(
                "markers.start and markers.end must differ".into(),
            ));
        }
        if self.markers.legacy == self.markers.start || self.markers.legacy == self.markers.end {
            return Err(ConfigError::Validation(
                "markers.legacy must differ from markers.start and markers.end".into(),
            ));
        }
        Ok(())
    }
}

/// Column roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnsConfig {
    /// Column whose value titles each detail page and names its file.
    pub title: String,
    /// Column whose index cells link to detail pages.
    pub link: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            title: "Algorithm".to_string(),
            link: "Algorithm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowsConfig {
    pub ragged: RaggedRows,
}

/// Load `config.toml` from `dir`, falling back to stock defaults.
///
/// Missing keys take their defaults via `#[serde(default)]`; unknown keys
/// and invalid values are errors.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = dir.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# csv-pages Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Paths are relative to the directory csv-pages runs in.
# Unknown keys will cause an error.

# CSV source. The first record is the header row.
input = "algorithms_tracker.csv"

# Existing HTML page that receives the index table. Rewritten in place.
shell = "index.html"

# Directory for the per-row detail pages. Also used as the link prefix
# in the index table, so keep it relative to the shell page.
pages_dir = "pages"

# ---------------------------------------------------------------------------
# Columns
# ---------------------------------------------------------------------------
[columns]
# Column naming each detail page (page title and file name).
title = "Algorithm"

# Column whose index cells link to the detail pages.
link = "Algorithm"

# ---------------------------------------------------------------------------
# Shell markers
# ---------------------------------------------------------------------------
# The table is written between start and end. A shell containing only the
# legacy marker is upgraded to start/end on the first run. Without any
# marker the table goes before </body>, or at the end of the file.
[markers]
start = "<!-- TABLE_START -->"
end = "<!-- TABLE_END -->"
legacy = "<!-- TABLE_HERE -->"

# ---------------------------------------------------------------------------
# Rows
# ---------------------------------------------------------------------------
[rows]
# What to do when a row has more or fewer fields than the header:
#   "pad"    - pad short rows with empty cells, drop extra cells
#   "reject" - stop with an error naming the line
ragged = "pad"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_classic_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.input, "algorithms_tracker.csv");
        assert_eq!(config.shell, "index.html");
        assert_eq!(config.pages_dir, "pages");
        assert_eq!(config.columns.title, "Algorithm");
        assert_eq!(config.columns.link, "Algorithm");
        assert_eq!(config.rows.ragged, RaggedRows::Pad);
    }

    #[test]
    fn default_markers() {
        let config = SiteConfig::default();
        assert_eq!(config.markers.start, "<!-- TABLE_START -->");
        assert_eq!(config.markers.end, "<!-- TABLE_END -->");
        assert_eq!(config.markers.legacy, "<!-- TABLE_HERE -->");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
input = "data/sorting.csv"

[columns]
title = "Name"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden values
        assert_eq!(config.input, "data/sorting.csv");
        assert_eq!(config.columns.title, "Name");
        // Defaults preserved
        assert_eq!(config.columns.link, "Algorithm");
        assert_eq!(config.shell, "index.html");
    }

    #[test]
    fn parse_ragged_policy() {
        let config: SiteConfig = toml::from_str("[rows]\nragged = \"reject\"\n").unwrap();
        assert_eq!(config.rows.ragged, RaggedRows::Reject);

        let result: Result<SiteConfig, _> = toml::from_str("[rows]\nragged = \"ignore\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
pages_dir = "site/algorithms"

[markers]
start = "<!-- begin table -->"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.pages_dir, "site/algorithms");
        assert_eq!(config.markers.start, "<!-- begin table -->");
        // Unspecified values should be defaults
        assert_eq!(config.markers.end, "<!-- TABLE_END -->");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "pages_dir = \"\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_rejects_identical_markers() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[markers]\nend = \"<!-- TABLE_START -->\"\n",
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must differ"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("inptu = \"x.csv\"\n");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[markers]\nbegin = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[columns]\ntitel = \"Name\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_values() {
        let mut config = SiteConfig::default();
        config.columns.title = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("columns.title"));

        let mut config = SiteConfig::default();
        config.markers.legacy = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_identical_start_and_end() {
        let mut config = SiteConfig::default();
        config.markers.end = config.markers.start.clone();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn validate_legacy_equal_to_start() {
        let mut config = SiteConfig::default();
        config.markers.legacy = config.markers.start.clone();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[columns]"));
        assert!(content.contains("[markers]"));
        assert!(content.contains("[rows]"));
    }
}
