// SPDX-License-Identifier: PMPL-1.0-or-later

//! The translation table shared by both conversion directions.
//!
//! Rows are keyed by translation key and kept in order of first
//! appearance. Each row holds exactly one value per language column.
//! A table is built in one pass over an input, read by one projection
//! per output, then dropped.

use crate::error::ConvertError;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Row {
    key: String,
    values: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    languages: Vec<String>,
    rows: Vec<Row>,
    index: HashMap<String, usize>,
}

impl TranslationTable {
    /// Create an empty table whose columns are `languages`, in that order.
    pub fn new(languages: Vec<String>) -> Self {
        Self {
            languages,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a row, or overwrite the values of an existing key in place.
    ///
    /// A repeated key keeps the position of its first insertion.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) -> Result<(), ConvertError> {
        let key = key.into();
        if values.len() != self.languages.len() {
            return Err(ConvertError::ColumnCount {
                key,
                expected: self.languages.len(),
                found: values.len(),
            });
        }

        match self.index.get(&key) {
            Some(&position) => self.rows[position].values = values,
            None => {
                self.index.insert(key.clone(), self.rows.len());
                self.rows.push(Row { key, values });
            }
        }
        Ok(())
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &str, language: &str) -> Option<&str> {
        let column = self.column(language)?;
        let &position = self.index.get(key)?;
        Some(self.rows[position].values[column].as_str())
    }

    /// Iterate rows as `(key, values)` with values in column order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rows
            .iter()
            .map(|row| (row.key.as_str(), row.values.as_slice()))
    }

    /// View of a single language column, or `None` if the table has no
    /// such column.
    pub fn project(&self, language: &str) -> Option<LanguageView<'_>> {
        self.column(language).map(|column| LanguageView {
            table: self,
            column,
        })
    }

    fn column(&self, language: &str) -> Option<usize> {
        self.languages.iter().position(|lang| lang == language)
    }
}

/// One language column of a [`TranslationTable`].
///
/// Serializes as a key → value map in table order.
#[derive(Debug, Clone, Copy)]
pub struct LanguageView<'a> {
    table: &'a TranslationTable,
    column: usize,
}

impl<'a> LanguageView<'a> {
    pub fn language(&self) -> &'a str {
        &self.table.languages[self.column]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let column = self.column;
        self.table
            .rows
            .iter()
            .map(move |row| (row.key.as_str(), row.values[column].as_str()))
    }
}

impl Serialize for LanguageView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
