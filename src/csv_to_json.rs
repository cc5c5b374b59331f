// SPDX-License-Identifier: PMPL-1.0-or-later

//! CSV → JSON: split one translation CSV into one JSON document per language.
//!
//! The CSV has no header row. Each record is `key, value, value, ...` with
//! one value per configured language. Records of any other width and
//! records with an empty key are skipped without error. Values carry
//! newlines as `\n` escapes, which are decoded before storage.

use crate::config::CsvToJsonConfig;
use crate::escape::unescape_newlines;
use crate::table::TranslationTable;
use anyhow::{anyhow, Context, Result};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvToJsonSummary {
    pub keys: usize,
    pub written: Vec<PathBuf>,
}

impl CsvToJsonSummary {
    /// Line printed once all documents are on disk, e.g.
    /// `JSON files (en.json and de.json) have been created.`
    pub fn completion_message(&self) -> String {
        let names: Vec<String> = self
            .written
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect();
        format!("JSON files ({}) have been created.", join_names(&names))
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// Parse CSV records from `reader` into a table with `languages` columns.
pub fn parse_table<R: Read>(reader: R, languages: &[String]) -> Result<TranslationTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let width = languages.len() + 1;
    let mut table = TranslationTable::new(languages.to_vec());

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        if record.len() != width {
            tracing::debug!(line, columns = record.len(), expected = width, "skipping row");
            continue;
        }
        let key = &record[0];
        if key.is_empty() {
            tracing::debug!(line, "skipping row with empty key");
            continue;
        }

        let values = record.iter().skip(1).map(unescape_newlines).collect();
        table.insert(key, values)?;
    }

    Ok(table)
}

pub fn read_table(path: &Path, languages: &[String]) -> Result<TranslationTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table =
        parse_table(file, languages).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), keys = table.len(), "read translation table");
    Ok(table)
}

/// Pretty-printed JSON object (2-space indent) for one language column.
pub fn render_document(table: &TranslationTable, language: &str) -> Result<String> {
    let view = table
        .project(language)
        .ok_or_else(|| anyhow!("language '{}' is not a column of the table", language))?;
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Write `<lang>.json` for every language column into `output_dir`.
///
/// Files are written one after another; a failure leaves any earlier
/// file in place.
pub fn write_documents(table: &TranslationTable, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(table.languages().len());
    for language in table.languages() {
        let path = output_dir.join(format!("{}.json", language));
        let document = render_document(table, language)?;
        fs::write(&path, document).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote translation document");
        written.push(path);
    }
    Ok(written)
}

pub fn run(config: &CsvToJsonConfig) -> Result<CsvToJsonSummary> {
    let table = read_table(&config.input, &config.languages)?;
    let written = write_documents(&table, &config.output_dir)?;
    Ok(CsvToJsonSummary {
        keys: table.len(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_de() -> Vec<String> {
        vec!["en".to_string(), "de".to_string()]
    }

    #[test]
    fn test_parse_skips_wrong_width_and_empty_keys() {
        let input = "a,A,AA\n\nshort,only\nlong,1,2,3\n,hello,hallo\nb,B,BB\n";
        let table = parse_table(input.as_bytes(), &en_de()).unwrap();

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_unescapes_values() {
        let input = "greeting,Hello\\nWorld,Hallo\\nWelt\n";
        let table = parse_table(input.as_bytes(), &en_de()).unwrap();
        assert_eq!(table.get("greeting", "en"), Some("Hello\nWorld"));
        assert_eq!(table.get("greeting", "de"), Some("Hallo\nWelt"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let input = "\"quoted, key\",\"Say \"\"hi\"\"\",\"Sag \"\"hallo\"\"\"\n";
        let table = parse_table(input.as_bytes(), &en_de()).unwrap();
        assert_eq!(table.get("quoted, key", "en"), Some("Say \"hi\""));
    }

    #[test]
    fn test_parse_invalid_utf8_fails() {
        let input: &[u8] = b"key,\xff\xfe,x\n";
        assert!(parse_table(input, &en_de()).is_err());
    }

    #[test]
    fn test_render_document_format() {
        let table = parse_table("greeting,Hello\\nWorld,Grüß dich\n".as_bytes(), &en_de()).unwrap();
        assert_eq!(
            render_document(&table, "en").unwrap(),
            "{\n  \"greeting\": \"Hello\\nWorld\"\n}"
        );
        assert_eq!(
            render_document(&table, "de").unwrap(),
            "{\n  \"greeting\": \"Grüß dich\"\n}"
        );
    }

    #[test]
    fn test_render_empty_table() {
        let table = TranslationTable::new(en_de());
        assert_eq!(render_document(&table, "en").unwrap(), "{}");
    }

    #[test]
    fn test_render_unknown_language() {
        let table = TranslationTable::new(en_de());
        assert!(render_document(&table, "fr").is_err());
    }

    #[test]
    fn test_completion_message() {
        let summary = CsvToJsonSummary {
            keys: 0,
            written: vec![PathBuf::from("out/en.json"), PathBuf::from("out/de.json")],
        };
        assert_eq!(
            summary.completion_message(),
            "JSON files (en.json and de.json) have been created."
        );
    }

    #[test]
    fn test_join_names() {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_names(&names(&["en.json"])), "en.json");
        assert_eq!(
            join_names(&names(&["en.json", "fr.json", "de.json"])),
            "en.json, fr.json and de.json"
        );
    }
}
