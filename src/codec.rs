//! Record codec
//!
//! Converts between a structured logical record and its fixed-width binary
//! layout.
//!
//! ## Encoding Rules
//! - `Integer32` fields are written as native-endian 4-byte integers.
//! - `FixedText` fields are written left-justified into their byte range,
//!   right-padded with spaces; over-long text is silently truncated to the
//!   field's byte length.
//! - Encoding never fails: records are validated against the schema when
//!   they are constructed.
//!
//! ## Decoding Rules
//! - Fails only when the input slice is shorter than the record length
//!   (`MalformedRecord`).
//! - Trailing pad bytes are stripped from text fields to recover the
//!   logical text; non-UTF-8 bytes decode lossily.

use crate::error::{IsamError, Result};
use crate::schema::{FieldKind, Schema};

/// Fill byte for text fields
pub(crate) const PAD: u8 = b' ';

// =============================================================================
// Field Values and Records
// =============================================================================

/// One decoded field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i32),
    Text(String),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Integer(_) => None,
        }
    }
}

/// One logical record conforming to a schema
///
/// Construction checks arity and field kinds against the schema, so a
/// `Record` can always be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<FieldValue>,
}

impl Record {
    /// Build a record, validating the values against the schema
    pub fn new(schema: &Schema, values: Vec<FieldValue>) -> Result<Self> {
        if values.len() != schema.fields().len() {
            return Err(IsamError::FieldMismatch(format!(
                "expected {} values, got {}",
                schema.fields().len(),
                values.len()
            )));
        }

        for (field, value) in schema.fields().iter().zip(&values) {
            let matches = match field.kind() {
                FieldKind::Integer32 => value.as_integer().is_some(),
                FieldKind::FixedText => value.as_text().is_some(),
            };
            if !matches {
                return Err(IsamError::FieldMismatch(format!(
                    "field '{}' has the wrong kind",
                    field.name()
                )));
            }
        }

        Ok(Self { values })
    }

    /// The primary key (the leading Integer32 field)
    pub fn key(&self) -> i32 {
        match self.values.first() {
            Some(FieldValue::Integer(k)) => *k,
            _ => 0,
        }
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

// =============================================================================
// Encoding / Decoding
// =============================================================================

/// Encode a record into its fixed-width binary form
pub fn encode(schema: &Schema, record: &Record) -> Vec<u8> {
    // Pre-fill with the pad byte so short text fields come out padded
    let mut buf = vec![PAD; schema.record_len()];

    for (field, value) in schema.fields().iter().zip(record.values()) {
        match field.kind() {
            FieldKind::Integer32 => {
                let v = value.as_integer().unwrap_or(0);
                buf[field.offset()..field.offset() + field.len()]
                    .copy_from_slice(&v.to_ne_bytes());
            }
            FieldKind::FixedText => {
                let bytes = value.as_text().unwrap_or("").as_bytes();
                let n = bytes.len().min(field.len());
                buf[field.offset()..field.offset() + n].copy_from_slice(&bytes[..n]);
            }
        }
    }

    buf
}

/// Decode a fixed-width binary record
///
/// Fails with `MalformedRecord` if `bytes` is shorter than the schema's
/// record length; extra trailing bytes are ignored.
pub fn decode(schema: &Schema, bytes: &[u8]) -> Result<Record> {
    if bytes.len() < schema.record_len() {
        return Err(IsamError::MalformedRecord {
            expected: schema.record_len(),
            actual: bytes.len(),
        });
    }

    let mut values = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let slice = &bytes[field.offset()..field.offset() + field.len()];
        match field.kind() {
            FieldKind::Integer32 => {
                let v = i32::from_ne_bytes([slice[0], slice[1], slice[2], slice[3]]);
                values.push(FieldValue::Integer(v));
            }
            FieldKind::FixedText => {
                // Strip trailing pad bytes back to the logical text
                let end = slice
                    .iter()
                    .rposition(|&b| b != PAD)
                    .map(|p| p + 1)
                    .unwrap_or(0);
                let text = String::from_utf8_lossy(&slice[..end]).into_owned();
                values.push(FieldValue::Text(text));
            }
        }
    }

    Ok(Record { values })
}
