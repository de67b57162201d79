//! Delimited text line parsing
//!
//! Token-based splitting with forgiving semantics: short lines yield fewer
//! fields, and a missing or non-numeric key field parses to `0`. There is no
//! quoting or escaping — the input format has none.

/// Split one input line into fields on `delimiter`.
///
/// A trailing line break (`\n` or `\r\n`) is stripped first.
pub fn parse_line(line: &str, delimiter: char) -> Vec<&str> {
    let line = line.trim_end_matches(['\n', '\r']);
    line.split(delimiter).collect()
}

/// Parse the leading key field of a split line.
///
/// An absent or non-numeric key yields `0`, which the loader treats as
/// "skip this record". An explicit key of `0` is indistinguishable from a
/// parse failure, matching the original behavior.
pub fn parse_key(fields: &[&str]) -> i32 {
    fields
        .first()
        .and_then(|f| f.trim().parse().ok())
        .unwrap_or(0)
}
