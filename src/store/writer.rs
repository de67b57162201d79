//! Store writer
//!
//! Creates the data file and appends fixed-width records, indexing each
//! key as it goes. `finish()` flushes, syncs, and persists the index
//! sidecar.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::codec::{self, Record};
use crate::error::{IsamError, Result};
use crate::schema::Schema;

use super::{index_path, KeyIndex};

/// Appends records to a newly created store
pub struct StoreWriter {
    /// Data file path
    path: PathBuf,
    /// Record layout (immutable for the store's lifetime)
    schema: Schema,
    /// Buffered writer for the data file
    writer: BufWriter<fs::File>,
    /// Ordering index, persisted on finish
    index: KeyIndex,
    /// Insertion sequence number of the next record
    next_seq: u64,
}

impl StoreWriter {
    /// Create a new store, truncating any existing data file
    ///
    /// Any stale index sidecar is removed up front so a crash before
    /// `finish()` cannot leave an old index describing the new file.
    pub fn create(path: &Path, schema: Schema) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| IsamError::StoreCreate(format!("{}: {}", path.display(), e)))?;

        let sidecar = index_path(path);
        if sidecar.exists() {
            fs::remove_file(&sidecar)
                .map_err(|e| IsamError::StoreCreate(format!("{}: {}", sidecar.display(), e)))?;
        }

        tracing::debug!(path = %path.display(), record_len = schema.record_len(), "store created");

        Ok(Self {
            path: path.to_path_buf(),
            schema,
            writer: BufWriter::new(file),
            index: KeyIndex::new(),
            next_seq: 0,
        })
    }

    /// Append one record at the next free position and index its key
    ///
    /// Keys may arrive in any order; equal keys keep their insertion order
    /// in later scans. A failed append leaves the record unindexed; the
    /// data-file length check at open catches any partial tail it wrote.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        let bytes = codec::encode(&self.schema, record);

        self.writer.write_all(&bytes).map_err(|e| {
            IsamError::StoreWrite(format!("record {}: {}", self.next_seq, e))
        })?;

        let offset = self.next_seq * self.schema.record_len() as u64;
        self.index.insert(record.key(), self.next_seq, offset);
        self.next_seq += 1;

        Ok(())
    }

    /// Number of records appended so far
    pub fn record_count(&self) -> u64 {
        self.next_seq
    }

    /// The store's record layout
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Flush and sync the data file, then persist the index sidecar
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;

        let file = self
            .writer
            .into_inner()
            .map_err(|e| IsamError::StoreWrite(format!("flush: {}", e)))?;
        file.sync_all()?;

        self.index.save(&index_path(&self.path))?;

        tracing::debug!(records = self.next_seq, path = %self.path.display(), "store finished");
        Ok(())
    }
}
