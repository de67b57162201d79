//! Store scanner
//!
//! Read-only views over a populated store: a bounded key-ordered preview
//! and an independent full count. The two never share a cursor, so running
//! them back-to-back cannot interfere.

use crate::codec::{FieldValue, Record};
use crate::error::Result;
use crate::store::StoreReader;

/// A bounded, key-ordered preview of a store
#[derive(Debug)]
pub struct Preview {
    /// Up to `limit` records in scan order
    pub records: Vec<Record>,
    /// True when the store holds more records beyond the preview
    pub truncated: bool,
}

/// Read up to `limit` records in key order, stopping early
pub fn preview(reader: &StoreReader, limit: usize) -> Result<Preview> {
    let mut cursor = reader.scan()?;
    let mut records = Vec::new();

    while records.len() < limit {
        match cursor.next() {
            Some(record) => records.push(record?),
            None => {
                return Ok(Preview {
                    records,
                    truncated: false,
                })
            }
        }
    }

    // One probe past the limit tells us whether anything remains
    let truncated = match cursor.next() {
        Some(record) => {
            record?;
            true
        }
        None => false,
    };

    Ok(Preview { records, truncated })
}

/// Total record count via an independent full scan
pub fn total_count(reader: &StoreReader) -> Result<u64> {
    reader.count()
}

/// Render one record as a two-line console block:
///
/// ```text
/// ID: 1 | Name: Alice | Email: a@x.com
///      Phone: 555-0001 | Date: 2024-01-01
/// ```
pub fn render(record: &Record) -> String {
    let text = |i: usize| {
        record
            .values()
            .get(i)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    };

    format!(
        "ID: {} | Name: {} | Email: {}\n     Phone: {} | Date: {}",
        record.key(),
        text(1),
        text(2),
        text(3),
        text(4)
    )
}
