// SPDX-License-Identifier: PMPL-1.0-or-later

//! Properties → CSV: merge per-language `.properties` files into one CSV.
//!
//! The first discovered language is the reference: its keys, in its file
//! order, decide which rows are emitted. Keys that exist only in other
//! languages are dropped; a reference key missing from another language
//! aborts the conversion with [`ConvertError::MissingKey`].

use crate::config::PropertiesToCsvConfig;
use crate::discovery::{discover, FilePattern};
use crate::error::ConvertError;
use crate::escape::escape_newlines;
use crate::properties::Properties;
use crate::table::TranslationTable;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Prepended to every key in the first CSV column.
pub const KEY_PREFIX: &str = ".";

#[derive(Debug, Clone)]
pub struct PropertiesToCsvSummary {
    pub languages: Vec<String>,
    pub keys: usize,
    pub output: PathBuf,
}

/// Discover and load every language file, in discovery order.
pub fn load_languages(config: &PropertiesToCsvConfig) -> Result<Vec<(String, Properties)>> {
    let pattern = FilePattern::new(&config.file_prefix, &config.file_extension)?;
    let mut files = discover(&config.directory, &pattern)?;
    if files.is_empty() {
        return Err(ConvertError::NoLanguageFiles {
            directory: config.directory.clone(),
            pattern: pattern.describe(),
        }
        .into());
    }
    if config.sort_languages {
        files.sort_by(|a, b| a.language.cmp(&b.language));
    }

    let mut languages = Vec::with_capacity(files.len());
    for file in files {
        let store = Properties::load(&file.path)?;
        languages.push((file.language, store));
    }
    Ok(languages)
}

/// Build the table over the reference (first) language's keys.
pub fn build_table(languages: &[(String, Properties)]) -> Result<TranslationTable, ConvertError> {
    let tags: Vec<String> = languages.iter().map(|(tag, _)| tag.clone()).collect();
    let mut table = TranslationTable::new(tags);
    let Some((reference, reference_store)) = languages.first() else {
        return Ok(table);
    };

    for key in reference_store.keys() {
        let values = languages
            .iter()
            .map(|(language, store)| {
                store
                    .get(key)
                    .map(str::to_string)
                    .ok_or_else(|| ConvertError::MissingKey {
                        key: key.to_string(),
                        reference: reference.clone(),
                        language: language.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        table.insert(key, values)?;
    }

    Ok(table)
}

/// Header `["", lang...]` followed by `[".key", value...]` per row, with
/// newlines escaped.
pub fn build_rows(table: &TranslationTable) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(table.len() + 1);

    let mut header = vec![String::new()];
    header.extend(table.languages().iter().cloned());
    rows.push(header);

    for (key, values) in table.rows() {
        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(format!("{}{}", KEY_PREFIX, key));
        row.extend(values.iter().map(|value| escape_newlines(value)));
        rows.push(row);
    }

    rows
}

/// Write rows as comma-delimited CSV with minimal quoting and CRLF endings.
pub fn write_csv(rows: &[Vec<String>], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn run(config: &PropertiesToCsvConfig) -> Result<PropertiesToCsvSummary> {
    let languages = load_languages(config)?;
    let table = build_table(&languages)?;
    write_csv(&build_rows(&table), &config.output)?;
    tracing::debug!(
        path = %config.output.display(),
        keys = table.len(),
        "wrote translation csv"
    );

    Ok(PropertiesToCsvSummary {
        languages: table.languages().to_vec(),
        keys: table.len(),
        output: config.output.clone(),
    })
}
