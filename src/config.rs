// SPDX-License-Identifier: PMPL-1.0-or-later

//! Converter configuration
//!
//! Defaults reproduce the fixed file names both converters have always
//! used. A YAML or JSON file may override any field; missing fields keep
//! their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_INPUT: &str = "translations.csv";
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "de"];
pub const DEFAULT_FILE_PREFIX: &str = "translations";
pub const DEFAULT_FILE_EXTENSION: &str = "properties";
pub const DEFAULT_CSV_OUTPUT: &str = "translations_new.csv";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub csv_to_json: CsvToJsonConfig,
    pub properties_to_csv: PropertiesToCsvConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvToJsonConfig {
    /// Source CSV: `key, <lang 1>, <lang 2>, ...` with no header row
    pub input: PathBuf,
    /// Language of each value column, in column order
    pub languages: Vec<String>,
    /// Directory receiving one `<lang>.json` per language
    pub output_dir: PathBuf,
}

impl Default for CsvToJsonConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_CSV_INPUT),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesToCsvConfig {
    /// Directory scanned for `<prefix>_<lang>.<extension>` files
    pub directory: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    pub output: PathBuf,
    /// Sort language columns by tag instead of directory-listing order
    pub sort_languages: bool,
}

impl Default for PropertiesToCsvConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            output: PathBuf::from(DEFAULT_CSV_OUTPUT),
            sort_languages: false,
        }
    }
}

impl ConvertConfig {
    /// Load from `path`: `.yaml`/`.yml` as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml config {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display()))?
        };
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
