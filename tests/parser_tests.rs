//! Tests for the delimited-text parser

use isamlite::csv::{parse_key, parse_line};

// =============================================================================
// Line Splitting Tests
// =============================================================================

#[test]
fn test_parse_line_splits_on_delimiter() {
    let fields = parse_line("1,Alice,a@x.com,555-0001,2024-01-01", ',');
    assert_eq!(fields, vec!["1", "Alice", "a@x.com", "555-0001", "2024-01-01"]);
}

#[test]
fn test_parse_line_strips_trailing_newline() {
    assert_eq!(parse_line("1,Alice\n", ','), vec!["1", "Alice"]);
    assert_eq!(parse_line("1,Alice\r\n", ','), vec!["1", "Alice"]);
}

#[test]
fn test_parse_line_short_line_yields_fewer_fields() {
    let fields = parse_line("7,Grace", ',');
    assert_eq!(fields.len(), 2);
}

#[test]
fn test_parse_line_keeps_empty_fields() {
    assert_eq!(parse_line("1,,x", ','), vec!["1", "", "x"]);
}

#[test]
fn test_parse_line_alternate_delimiter() {
    assert_eq!(parse_line("1|Alice|a@x.com", '|'), vec!["1", "Alice", "a@x.com"]);
}

// =============================================================================
// Key Parsing Tests
// =============================================================================

#[test]
fn test_parse_key_numeric() {
    assert_eq!(parse_key(&["42", "Alice"]), 42);
}

#[test]
fn test_parse_key_trims_whitespace() {
    assert_eq!(parse_key(&[" 7 "]), 7);
}

#[test]
fn test_parse_key_negative() {
    assert_eq!(parse_key(&["-3"]), -3);
}

#[test]
fn test_parse_key_non_numeric_yields_zero() {
    assert_eq!(parse_key(&["abc", "Alice"]), 0);
}

#[test]
fn test_parse_key_empty_field_yields_zero() {
    assert_eq!(parse_key(&["", "Alice"]), 0);
}

#[test]
fn test_parse_key_absent_yields_zero() {
    assert_eq!(parse_key(&[]), 0);
}
