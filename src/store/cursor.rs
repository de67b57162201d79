//! Scan cursor
//!
//! Single-direction read position over a store's key-ordered record
//! sequence. A cursor moves through three states:
//!
//! ```text
//! Fresh ──next──> Positioned ──next──> ... ──next──> Exhausted
//!   └────────────────next (empty store)────────────────┘
//! ```
//!
//! `Exhausted` is terminal: once `next()` has returned `None`, every
//! subsequent call returns `None`. Cursors are never rewound; open a fresh
//! cursor to scan again.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use crate::codec::{self, Record};
use crate::error::{IsamError, Result};
use crate::schema::Schema;

/// Iterator over a store's records in ascending-key, then-insertion order
pub struct ScanCursor {
    /// Cursor-owned file handle (independent of other cursors)
    file: BufReader<File>,
    schema: Schema,
    /// Record byte offsets in scan order, snapshotted at open
    offsets: Vec<u64>,
    /// Next position in `offsets`
    pos: usize,
    /// Terminal state flag
    exhausted: bool,
}

impl ScanCursor {
    pub(super) fn new(file: BufReader<File>, schema: Schema, offsets: Vec<u64>) -> Self {
        Self {
            file,
            schema,
            offsets,
            pos: 0,
            exhausted: false,
        }
    }

    /// Read and decode the record at `offset`
    ///
    /// A short read means the data file shrank underneath us — surfaced as
    /// `MalformedRecord` with the number of bytes actually present.
    fn read_at(&mut self, offset: u64) -> Result<Record> {
        self.file.seek(SeekFrom::Start(offset))?;

        let record_len = self.schema.record_len();
        let mut buf = vec![0u8; record_len];
        let mut filled = 0;
        while filled < record_len {
            let n = self.file.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(IsamError::MalformedRecord {
                    expected: record_len,
                    actual: filled,
                });
            }
            filled += n;
        }

        codec::decode(&self.schema, &buf)
    }
}

impl Iterator for ScanCursor {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.pos >= self.offsets.len() {
            self.exhausted = true;
            return None;
        }

        let offset = self.offsets[self.pos];
        self.pos += 1;

        match self.read_at(offset) {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                // Corruption ends the scan; the cursor stays terminal
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}
