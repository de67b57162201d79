//! Keyed Record Store
//!
//! A persisted collection of fixed-width records keyed by a leading 32-bit
//! integer (duplicates permitted), scannable in ascending-key order with
//! insertion order preserved among equal keys.
//!
//! ## On-Disk Layout
//!
//! The data file is a bare sequence of fixed-length records with no
//! inter-record delimiters:
//!
//! ```text
//! ┌──────────────┬──────────────┬─────┬──────────────┐
//! │ Record 0     │ Record 1     │ ... │ Record N-1   │
//! │ (record_len) │ (record_len) │     │ (record_len) │
//! └──────────────┴──────────────┴─────┴──────────────┘
//! ```
//!
//! The ordering index is persisted beside it as `<data>.idx`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "ISLX" (4) | Version: u16 (2) | Count: u64 (8) │
//! ├─────────────────────────────────────────────────────────┤
//! │ Entry Payload (bincode)                                 │
//! │   [(key: i32, seq: u64, offset: u64)] in scan order     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                        │
//! │   PayloadCRC: u32                                       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The sidecar is strictly an open-time optimization: any validation
//! failure (bad magic, version, checksum, or a count that disagrees with
//! the data file length) falls back to rebuilding the index by scanning
//! the data file.

mod cursor;
mod index;
mod reader;
mod writer;

use std::path::{Path, PathBuf};

pub use cursor::ScanCursor;
pub use reader::StoreReader;
pub use writer::StoreWriter;

pub(crate) use index::KeyIndex;

// =============================================================================
// Shared Constants (used by index, reader, writer)
// =============================================================================

/// Magic bytes identifying an isamlite index sidecar
pub(crate) const INDEX_MAGIC: &[u8; 4] = b"ISLX";

/// Current index sidecar format version
pub(crate) const INDEX_VERSION: u16 = 1;

/// Sidecar header size: Magic (4) + Version (2) + EntryCount (8) = 14 bytes
pub(crate) const INDEX_HEADER_SIZE: usize = 14;

/// Sidecar footer size: PayloadCRC (4)
pub(crate) const INDEX_FOOTER_SIZE: usize = 4;

/// Sidecar path for a data file: `customers.isam` -> `customers.isam.idx`
pub(crate) fn index_path(data_path: &Path) -> PathBuf {
    let mut name = data_path.as_os_str().to_os_string();
    name.push(".idx");
    PathBuf::from(name)
}
