// SPDX-License-Identifier: PMPL-1.0-or-later

//! Domain errors raised by the converters.
//!
//! Everything else (I/O, CSV tokenization, JSON/YAML) travels as
//! `anyhow::Error` with file context attached; these variants are the
//! failures callers may want to match on via `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("key '{key}' of reference language '{reference}' is missing from '{language}'")]
    MissingKey {
        key: String,
        reference: String,
        language: String,
    },

    #[error("no files matching {pattern} in {}", .directory.display())]
    NoLanguageFiles { directory: PathBuf, pattern: String },

    #[error("line {line}: {message}")]
    PropertiesSyntax { line: usize, message: String },

    #[error("row '{key}' has {found} values, table has {expected} languages")]
    ColumnCount {
        key: String,
        expected: usize,
        found: usize,
    },
}
