// SPDX-License-Identifier: PMPL-1.0-or-later

//! tr-convert — translation table conversion between CSV, JSON and
//! Java `.properties` files.
//!
//! Two one-shot converters share one in-memory [`TranslationTable`]:
//! 1. **csv_to_json**: one `key,en,de` CSV → `en.json` and `de.json`.
//! 2. **properties_to_csv**: `translations_<lang>.properties` files →
//!    `translations_new.csv` with one column per language.
//!
//! Cells in CSV form carry newlines as a `\n` escape; JSON carries them
//! natively.

pub mod config;
pub mod csv_to_json;
pub mod discovery;
pub mod error;
pub mod escape;
pub mod properties;
pub mod properties_to_csv;
pub mod table;

pub use config::ConvertConfig;
pub use error::ConvertError;
pub use properties::Properties;
pub use table::{LanguageView, TranslationTable};
