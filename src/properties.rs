// SPDX-License-Identifier: PMPL-1.0-or-later

//! Loader for Java-style `.properties` key/value files.
//!
//! Follows the `java.util.Properties` text format: `#`/`!` comments,
//! backslash line continuation, `=`/`:`/whitespace separators and the
//! `\t \n \r \f \uXXXX` escapes. Entries keep the order in which their
//! keys first appear; a repeated key takes the later value.

use crate::error::ConvertError;
use anyhow::{Context, Result};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Properties {
    /// Read and parse a properties file.
    ///
    /// The file is decoded as UTF-8, falling back to ISO-8859-1 when it is
    /// not valid UTF-8.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let text = decode_text(&bytes);
        let properties =
            Self::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            entries = properties.len(),
            "loaded properties file"
        );
        Ok(properties)
    }

    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let mut properties = Self::default();
        let mut physical = text.lines().enumerate();

        while let Some((index, raw)) = physical.next() {
            let line = index + 1;
            let trimmed = raw.trim_start_matches(is_blank);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match physical.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical, line)?;
            properties.insert(key, value);
        }

        Ok(properties)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        // encoding_rs maps the ISO-8859-1 label onto windows-1252.
        None => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), ConvertError> {
    let chars: Vec<char> = logical.chars().collect();

    let mut key_end = 0;
    let mut escaped = false;
    while key_end < chars.len() {
        let c = chars[key_end];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            break;
        }
        key_end += 1;
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
        while value_start < chars.len() && is_blank(chars[value_start]) {
            value_start += 1;
        }
    }

    let raw_key: String = chars[..key_end].iter().collect();
    let raw_value: String = chars[value_start..].iter().collect();
    Ok((unescape(&raw_key, line)?, unescape(&raw_value, line)?))
}

fn unescape(raw: &str, line: usize) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(raw.len());
    // \uXXXX escapes are UTF-16 code units; consecutive ones may form a
    // surrogate pair, so they are buffered and decoded together.
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    units.push(parse_code_unit(&hex, line)?);
                    continue;
                }
                Some(escaped) => {
                    flush_units(&mut units, &mut out, line)?;
                    out.push(match escaped {
                        't' => '\t',
                        'n' => '\n',
                        'r' => '\r',
                        'f' => '\x0c',
                        other => other,
                    });
                }
                None => flush_units(&mut units, &mut out, line)?,
            }
        } else {
            flush_units(&mut units, &mut out, line)?;
            out.push(c);
        }
    }
    flush_units(&mut units, &mut out, line)?;

    Ok(out)
}

fn parse_code_unit(hex: &str, line: usize) -> Result<u16, ConvertError> {
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConvertError::PropertiesSyntax {
            line,
            message: format!("malformed \\u escape '\\u{}'", hex),
        });
    }
    u16::from_str_radix(hex, 16).map_err(|err| ConvertError::PropertiesSyntax {
        line,
        message: format!("malformed \\u escape '\\u{}': {}", hex, err),
    })
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line: usize) -> Result<(), ConvertError> {
    for decoded in char::decode_utf16(units.drain(..)) {
        let c = decoded.map_err(|err| ConvertError::PropertiesSyntax {
            line,
            message: format!("invalid \\u escape: {}", err),
        })?;
        out.push(c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        let props = Properties::parse("a=1\nb = 2\nc:3\nd 4\ne\t=\t5\n").unwrap();
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.get("e"), Some("5"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let props = Properties::parse("# comment\n  ! also comment\n\n   \nkey=value\n").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_key_without_value() {
        let props = Properties::parse("lonely\nempty=\n").unwrap();
        assert_eq!(props.get("lonely"), Some(""));
        assert_eq!(props.get("empty"), Some(""));
    }

    #[test]
    fn test_value_keeps_inner_separators() {
        let props = Properties::parse("url = http://example.com/a=b\n").unwrap();
        assert_eq!(props.get("url"), Some("http://example.com/a=b"));
    }

    #[test]
    fn test_line_continuation() {
        let text = "message = first line \\\n          second line\nnext=1\n";
        let props = Properties::parse(text).unwrap();
        assert_eq!(props.get("message"), Some("first line second line"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let props = Properties::parse("path=C:\\\\\nother=x\n").unwrap();
        assert_eq!(props.get("path"), Some("C:\\"));
        assert_eq!(props.get("other"), Some("x"));
    }

    #[test]
    fn test_escapes_in_value() {
        let props = Properties::parse("multi=Hello\\nWorld\\t!\\\\ \\q\n").unwrap();
        assert_eq!(props.get("multi"), Some("Hello\nWorld\t!\\ q"));
    }

    #[test]
    fn test_escaped_separator_in_key() {
        let props = Properties::parse("a\\=b\\ c=d\n").unwrap();
        assert_eq!(props.get("a=b c"), Some("d"));
    }

    #[test]
    fn test_unicode_escapes() {
        let props = Properties::parse("greeting=Gr\\u00fc\\u00dfe\nemoji=\\ud83d\\ude00\n").unwrap();
        assert_eq!(props.get("greeting"), Some("Grüße"));
        assert_eq!(props.get("emoji"), Some("😀"));
    }

    #[test]
    fn test_malformed_unicode_escape_reports_line() {
        let err = Properties::parse("ok=1\nbad=\\u12x4\n").unwrap_err();
        match err {
            ConvertError::PropertiesSyntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lone_surrogate_rejected() {
        assert!(Properties::parse("bad=\\ud83d!\n").is_err());
    }

    #[test]
    fn test_duplicate_key_keeps_first_position() {
        let props = Properties::parse("a=1\nb=2\na=3\n").unwrap();
        let keys: Vec<&str> = props.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(props.get("a"), Some("3"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let props = Properties::parse("a=1\r\nb=2\r\n").unwrap();
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
    }

    #[test]
    fn test_decode_latin1_fallback() {
        let bytes = b"name=Gr\xfc\xdfe\n";
        assert_eq!(decode_text(bytes), "name=Grüße\n");
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = b"\xEF\xBB\xBFkey=v\n";
        assert_eq!(decode_text(bytes), "key=v\n");
    }
}
