//! Ordering index
//!
//! Maintains the scan order over the data file: ascending primary key,
//! ties broken by ascending insertion sequence number — never by physical
//! offset alone (offset and insertion order only coincide because the
//! store is append-only).

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IsamError, Result};

use super::{INDEX_FOOTER_SIZE, INDEX_HEADER_SIZE, INDEX_MAGIC, INDEX_VERSION};

/// One persisted index entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    key: i32,
    seq: u64,
    offset: u64,
}

/// In-memory ordering over the store's primary key
///
/// Maps `(key, insertion sequence)` to the record's byte offset in the
/// data file. BTreeMap iteration order is the scan order.
#[derive(Debug, Default)]
pub(crate) struct KeyIndex {
    entries: BTreeMap<(i32, u64), u64>,
}

impl KeyIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert one record's position under `(key, seq)`
    pub(crate) fn insert(&mut self, key: i32, seq: u64, offset: u64) {
        self.entries.insert((key, seq), offset);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record byte offsets in scan order
    pub(crate) fn ordered_offsets(&self) -> Vec<u64> {
        self.entries.values().copied().collect()
    }

    // =========================================================================
    // Sidecar Persistence
    // =========================================================================

    /// Write the sidecar: header, bincode entry payload, payload CRC
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let entries: Vec<IndexEntry> = self
            .entries
            .iter()
            .map(|(&(key, seq), &offset)| IndexEntry { key, seq, offset })
            .collect();

        let payload = bincode::serialize(&entries)
            .map_err(|e| IsamError::Serialization(format!("index entries: {}", e)))?;

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&payload);
        let crc = hasher.finalize();

        let mut buf =
            Vec::with_capacity(INDEX_HEADER_SIZE + payload.len() + INDEX_FOOTER_SIZE);
        buf.extend_from_slice(INDEX_MAGIC);
        buf.extend_from_slice(&INDEX_VERSION.to_le_bytes());
        buf.extend_from_slice(&(entries.len() as u64).to_le_bytes());
        buf.extend_from_slice(&payload);
        buf.extend_from_slice(&crc.to_le_bytes());

        fs::write(path, buf)?;
        Ok(())
    }

    /// Load and validate a sidecar
    ///
    /// Any structural problem is `IndexCorrupt`; callers recover by
    /// rebuilding from the data file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;

        if data.len() < INDEX_HEADER_SIZE + INDEX_FOOTER_SIZE {
            return Err(IsamError::IndexCorrupt(format!(
                "sidecar too short: {} bytes",
                data.len()
            )));
        }

        if &data[0..4] != INDEX_MAGIC {
            return Err(IsamError::IndexCorrupt(format!(
                "invalid magic: expected ISLX, got {:?}",
                &data[0..4]
            )));
        }

        let version = u16::from_le_bytes([data[4], data[5]]);
        if version != INDEX_VERSION {
            return Err(IsamError::IndexCorrupt(format!(
                "unsupported version: {}",
                version
            )));
        }

        let count = u64::from_le_bytes(data[6..14].try_into().unwrap());

        let payload = &data[INDEX_HEADER_SIZE..data.len() - INDEX_FOOTER_SIZE];
        let stored_crc =
            u32::from_le_bytes(data[data.len() - INDEX_FOOTER_SIZE..].try_into().unwrap());

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(payload);
        if hasher.finalize() != stored_crc {
            return Err(IsamError::IndexCorrupt("checksum mismatch".to_string()));
        }

        let entries: Vec<IndexEntry> = bincode::deserialize(payload)
            .map_err(|e| IsamError::IndexCorrupt(format!("entry payload: {}", e)))?;

        if entries.len() as u64 != count {
            return Err(IsamError::IndexCorrupt(format!(
                "header count {} disagrees with {} entries",
                count,
                entries.len()
            )));
        }

        let mut index = Self::new();
        for entry in entries {
            index.insert(entry.key, entry.seq, entry.offset);
        }
        Ok(index)
    }

    /// Rebuild the index by scanning a data file of fixed-width records
    ///
    /// Physical order is insertion order (the store is append-only), so the
    /// sequence number is the record's position in the file. A partial
    /// trailing record is `MalformedRecord`.
    pub(crate) fn rebuild<R: Read>(mut input: R, record_len: usize) -> Result<Self> {
        let mut index = Self::new();
        let mut buf = vec![0u8; record_len];
        let mut seq: u64 = 0;

        loop {
            let mut filled = 0;
            while filled < record_len {
                let n = input.read(&mut buf[filled..])?;
                if n == 0 {
                    break;
                }
                filled += n;
            }

            if filled == 0 {
                break; // clean end of file
            }
            if filled < record_len {
                return Err(IsamError::MalformedRecord {
                    expected: record_len,
                    actual: filled,
                });
            }

            let key = i32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]);
            index.insert(key, seq, seq * record_len as u64);
            seq += 1;
        }

        Ok(index)
    }
}
