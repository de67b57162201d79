//! Bulk loader
//!
//! Reads delimited text records, encodes them, and appends them to a
//! store.
//!
//! ## Responsibilities
//! - Skip the header line (its absence is a fatal input error)
//! - Skip records whose key is blank, non-numeric, or explicitly `0`
//! - Count per-record append failures without aborting the batch
//! - Report progress at a configurable interval

use std::io::BufRead;

use crate::codec::{FieldValue, Record};
use crate::config::Config;
use crate::csv;
use crate::error::{IsamError, Result};
use crate::schema::{FieldKind, Schema};
use crate::store::StoreWriter;

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records successfully appended
    pub loaded: u64,
    /// Records whose append failed (counted, never fatal)
    pub failed: u64,
}

/// Load every record from `input` into `writer`
///
/// Skipped records (key `0`) touch neither counter. Only input-level
/// failures — a missing header or an unreadable line — abort the load.
pub fn load_all<R: BufRead>(
    input: R,
    writer: &mut StoreWriter,
    config: &Config,
) -> Result<LoadReport> {
    let mut lines = input.lines();

    // Header line is mandatory; an empty input is an input error, not an
    // empty load.
    match lines.next() {
        Some(header) => {
            header?;
        }
        None => return Err(IsamError::Input("missing header line".to_string())),
    }

    let mut report = LoadReport::default();

    for line in lines {
        let line = line?;
        let fields = csv::parse_line(&line, config.delimiter);

        let key = csv::parse_key(&fields);
        if key == 0 {
            // Blank or unparseable key — skip silently, no counter
            continue;
        }

        let record = build_record(writer.schema(), key, &fields)?;
        match writer.append(&record) {
            Ok(()) => {
                report.loaded += 1;
                if config.progress_every > 0 && report.loaded % config.progress_every == 0 {
                    tracing::info!(loaded = report.loaded, "load progress");
                }
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "record append failed");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Build a record from split fields
///
/// Field 0 is the already-parsed key; missing trailing fields become empty
/// text. Over-long text is left to the codec's truncation rule.
fn build_record(schema: &Schema, key: i32, fields: &[&str]) -> Result<Record> {
    let mut values = Vec::with_capacity(schema.fields().len());
    values.push(FieldValue::Integer(key));

    for (i, field) in schema.fields().iter().enumerate().skip(1) {
        let raw = fields.get(i).copied().unwrap_or("");
        match field.kind() {
            FieldKind::Integer32 => {
                values.push(FieldValue::Integer(raw.trim().parse().unwrap_or(0)));
            }
            FieldKind::FixedText => {
                values.push(FieldValue::Text(raw.to_string()));
            }
        }
    }

    Record::new(schema, values)
}
