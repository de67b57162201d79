//! Record schema definitions
//!
//! A schema is the fixed layout of one record format: an ordered sequence of
//! typed fields plus the total record length. Fields occupy non-overlapping,
//! contiguous byte ranges; the primary key is always a 32-bit integer at
//! offset 0. A schema is immutable once a store has been created with it.

use crate::error::{IsamError, Result};

/// Byte length of an `Integer32` field
pub(crate) const INTEGER32_LEN: usize = 4;

/// The type of one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Native signed 32-bit integer
    Integer32,

    /// Space-padded text of a fixed byte length
    FixedText,
}

/// One typed slot in a record layout
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    offset: usize,
    len: usize,
    kind: FieldKind,
}

impl Field {
    /// A native 32-bit integer field (always 4 bytes)
    pub fn integer32(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            len: INTEGER32_LEN,
            kind: FieldKind::Integer32,
        }
    }

    /// A fixed-width, space-padded text field
    pub fn fixed_text(name: impl Into<String>, offset: usize, len: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            len,
            kind: FieldKind::FixedText,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// The fixed layout of one record format
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    record_len: usize,
}

impl Schema {
    /// Build a schema, validating the layout:
    ///
    /// - the first field is the `Integer32` primary key at offset 0
    /// - every field has a non-zero length
    /// - fields are contiguous and non-overlapping, covering exactly
    ///   `record_len` bytes
    pub fn new(fields: Vec<Field>, record_len: usize) -> Result<Self> {
        let first = fields.first().ok_or_else(|| {
            IsamError::InvalidSchema("schema has no fields".to_string())
        })?;

        if first.offset != 0 || first.kind != FieldKind::Integer32 {
            return Err(IsamError::InvalidSchema(
                "first field must be an Integer32 key at offset 0".to_string(),
            ));
        }

        let mut expected_offset = 0;
        for field in &fields {
            if field.len == 0 {
                return Err(IsamError::InvalidSchema(format!(
                    "field '{}' has zero length",
                    field.name
                )));
            }
            if field.offset != expected_offset {
                return Err(IsamError::InvalidSchema(format!(
                    "field '{}' at offset {} leaves a gap or overlap (expected offset {})",
                    field.name, field.offset, expected_offset
                )));
            }
            expected_offset += field.len;
        }

        if expected_offset != record_len {
            return Err(IsamError::InvalidSchema(format!(
                "fields cover {} bytes but record length is {}",
                expected_offset, record_len
            )));
        }

        Ok(Self { fields, record_len })
    }

    /// The customer record layout (185 bytes):
    ///
    /// ```text
    /// ┌────────┬────────┬─────────────────────────────┐
    /// │ Offset │ Length │ Field                       │
    /// ├────────┼────────┼─────────────────────────────┤
    /// │      0 │      4 │ customer_id (Integer32 key) │
    /// │      4 │     50 │ name                        │
    /// │     54 │    100 │ email                       │
    /// │    154 │     20 │ phone                       │
    /// │    174 │     11 │ registration_date           │
    /// └────────┴────────┴─────────────────────────────┘
    /// ```
    pub fn customer() -> Self {
        // Layout is statically correct, so this skips new()'s validation.
        Self {
            fields: vec![
                Field::integer32("customer_id", 0),
                Field::fixed_text("name", 4, 50),
                Field::fixed_text("email", 54, 100),
                Field::fixed_text("phone", 154, 20),
                Field::fixed_text("registration_date", 174, 11),
            ],
            record_len: 185,
        }
    }

    /// The ordered fields of this layout
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Total record length in bytes
    pub fn record_len(&self) -> usize {
        self.record_len
    }
}
