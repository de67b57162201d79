//! # isamlite
//!
//! A keyed fixed-width record store:
//! - Fixed-length binary records keyed by a leading 32-bit integer
//! - Duplicate keys permitted, insertion order preserved among equals
//! - Bulk construction from delimited text input
//! - Key-ordered sequential scans with explicit cursor state
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────┐
//! │      Loader      │        │     Scanner      │
//! │  (text → store)  │        │ (preview + count)│
//! └────────┬─────────┘        └────────┬─────────┘
//!          │                           │
//!          ▼                           ▼
//! ┌─────────────────────────────────────────────┐
//! │                 Keyed Store                 │
//! │   StoreWriter / StoreReader / ScanCursor    │
//! │   data file + (key, seq) ordering index     │
//! └────────┬───────────────────────────┬────────┘
//!          │                           │
//!          ▼                           ▼
//!   ┌─────────────┐             ┌─────────────┐
//!   │ Record Codec│             │  Key Index  │
//!   │ (fixed-width│             │ + sidecar   │
//!   │   layout)   │             │ persistence │
//!   └─────────────┘             └─────────────┘
//! ```
//!
//! The loader runs once to populate a store from delimited text; the
//! scanner runs independently, later, to enumerate it in key order. The
//! store files are the shared artifact between the two.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod schema;
pub mod codec;
pub mod csv;
pub mod store;
pub mod loader;
pub mod scanner;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use codec::{FieldValue, Record};
pub use config::Config;
pub use error::{IsamError, Result};
pub use loader::LoadReport;
pub use scanner::Preview;
pub use schema::{Field, FieldKind, Schema};
pub use store::{ScanCursor, StoreReader, StoreWriter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of isamlite
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
