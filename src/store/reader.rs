//! Store reader
//!
//! Opens an existing store, validates the data file, loads (or rebuilds)
//! the ordering index, and hands out independent scan cursors.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{IsamError, Result};
use crate::schema::Schema;

use super::{index_path, KeyIndex, ScanCursor};

/// Read-only handle on a populated store
pub struct StoreReader {
    /// Data file path
    path: PathBuf,
    /// Record layout the store was created with
    schema: Schema,
    /// Scan ordering, loaded from the sidecar or rebuilt
    index: KeyIndex,
}

impl StoreReader {
    /// Open a store for scanning
    ///
    /// Fails with `StoreOpen` if the data file is missing or unreadable,
    /// and with `MalformedRecord` if its length is not a whole number of
    /// records. The index sidecar is used when it validates and agrees
    /// with the data file; otherwise the index is rebuilt by scanning.
    pub fn open(path: &Path, schema: Schema) -> Result<Self> {
        let metadata = fs::metadata(path)
            .map_err(|e| IsamError::StoreOpen(format!("{}: {}", path.display(), e)))?;

        let record_len = schema.record_len() as u64;
        let tail = metadata.len() % record_len;
        if tail != 0 {
            return Err(IsamError::MalformedRecord {
                expected: schema.record_len(),
                actual: tail as usize,
            });
        }
        let record_count = metadata.len() / record_len;

        let sidecar = index_path(path);
        let index = match KeyIndex::load(&sidecar) {
            Ok(index) if index.len() as u64 == record_count => index,
            Ok(index) => {
                tracing::warn!(
                    sidecar_entries = index.len(),
                    data_records = record_count,
                    "index sidecar is stale, rebuilding"
                );
                Self::rebuild_index(path, &schema)?
            }
            Err(e) => {
                if sidecar.exists() {
                    tracing::warn!(error = %e, "index sidecar invalid, rebuilding");
                } else {
                    tracing::debug!(path = %path.display(), "no index sidecar, rebuilding");
                }
                Self::rebuild_index(path, &schema)?
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            schema,
            index,
        })
    }

    fn rebuild_index(path: &Path, schema: &Schema) -> Result<KeyIndex> {
        let file = File::open(path)
            .map_err(|e| IsamError::StoreOpen(format!("{}: {}", path.display(), e)))?;
        KeyIndex::rebuild(BufReader::new(file), schema.record_len())
    }

    /// Open a fresh cursor, positioned before the first record in key order
    ///
    /// Each cursor owns its own file handle, so any number of cursors can
    /// read the same store without interfering with one another.
    pub fn scan(&self) -> Result<ScanCursor> {
        let file = File::open(&self.path)
            .map_err(|e| IsamError::StoreOpen(format!("{}: {}", self.path.display(), e)))?;

        Ok(ScanCursor::new(
            BufReader::new(file),
            self.schema.clone(),
            self.index.ordered_offsets(),
        ))
    }

    /// Total number of records, counted by a full scan with a fresh cursor
    ///
    /// Deliberately a real scan rather than an index size lookup: the
    /// contract is "how many records a scan yields", and the count never
    /// shares state with any caller-held cursor.
    pub fn count(&self) -> Result<u64> {
        let mut total = 0;
        for record in self.scan()? {
            record?;
            total += 1;
        }
        Ok(total)
    }

    /// The store's record layout
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The data file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
