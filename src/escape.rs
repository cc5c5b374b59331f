// SPDX-License-Identifier: PMPL-1.0-or-later

//! Newline escaping for single-line-per-record storage (CSV cells).

/// Two-character stand-in for a literal newline inside a CSV cell.
pub const ESCAPED_NEWLINE: &str = "\\n";

/// Replace every literal newline with `\n` (backslash, letter n).
pub fn escape_newlines(value: &str) -> String {
    value.replace('\n', ESCAPED_NEWLINE)
}

/// Replace every `\n` (backslash, letter n) with a literal newline.
///
/// Plain substring replacement: other backslash sequences are left alone.
pub fn unescape_newlines(value: &str) -> String {
    value.replace(ESCAPED_NEWLINE, "\n")
}
