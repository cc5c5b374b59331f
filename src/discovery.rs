// SPDX-License-Identifier: PMPL-1.0-or-later

//! Discovery of per-language translation files
//!
//! Lists a single directory (no recursion) and keeps the files whose name
//! matches `<prefix>_<lang>.<extension>`, where `<lang>` is one or more
//! word characters. Results come back in directory-listing order.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
    prefix: String,
    extension: String,
}

impl FilePattern {
    pub fn new(prefix: &str, extension: &str) -> Result<Self> {
        let source = format!(
            r"^{}_(\w+)\.{}$",
            regex::escape(prefix),
            regex::escape(extension)
        );
        let regex = Regex::new(&source)
            .with_context(|| format!("compiling file pattern {}", source))?;
        Ok(Self {
            regex,
            prefix: prefix.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Language tag captured from a bare file name, if it matches.
    pub fn language_of<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Human-readable form, e.g. `translations_<lang>.properties`.
    pub fn describe(&self) -> String {
        format!("{}_<lang>.{}", self.prefix, self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    pub language: String,
    pub path: PathBuf,
}

/// Find all files in `directory` matching `pattern`.
pub fn discover(directory: &Path, pattern: &FilePattern) -> Result<Vec<LanguageFile>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("listing {}", directory.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some(language) = pattern.language_of(name) {
            tracing::debug!(language, path = %path.display(), "discovered language file");
            files.push(LanguageFile {
                language: language.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> FilePattern {
        FilePattern::new("translations", "properties").unwrap()
    }

    #[test]
    fn test_language_captured() {
        let pattern = pattern();
        assert_eq!(pattern.language_of("translations_en.properties"), Some("en"));
        assert_eq!(pattern.language_of("translations_pt_BR.properties"), Some("pt_BR"));
    }

    #[test]
    fn test_non_matching_names() {
        let pattern = pattern();
        assert_eq!(pattern.language_of("translations_.properties"), None);
        assert_eq!(pattern.language_of("translations_en-US.properties"), None);
        assert_eq!(pattern.language_of("translations_en.properties.bak"), None);
        assert_eq!(pattern.language_of("translations_enXproperties"), None);
        assert_eq!(pattern.language_of("old_translations_en.properties"), None);
        assert_eq!(pattern.language_of("translations.csv"), None);
    }

    #[test]
    fn test_prefix_is_literal() {
        let pattern = FilePattern::new("a.b", "txt").unwrap();
        assert_eq!(pattern.language_of("a.b_fr.txt"), Some("fr"));
        assert_eq!(pattern.language_of("aXb_fr.txt"), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(pattern().describe(), "translations_<lang>.properties");
    }
}
