//! Tests for the keyed record store
//!
//! These tests verify:
//! - Key-ordered scans with duplicate keys in insertion order
//! - Cursor terminal idempotence and cursor independence
//! - Count-equals-scan invariant
//! - Index sidecar persistence, staleness detection, and rebuild
//! - Data file corruption detection

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use isamlite::codec::{FieldValue, Record};
use isamlite::{IsamError, Schema, StoreReader, StoreWriter};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.isam");
    (temp_dir, path)
}

fn sidecar_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.idx", path.display()))
}

fn customer(id: i32, name: &str) -> Record {
    Record::new(
        &Schema::customer(),
        vec![
            FieldValue::Integer(id),
            FieldValue::Text(name.to_string()),
            FieldValue::Text(format!("{}@example.com", name.to_lowercase())),
            FieldValue::Text("555-0000".to_string()),
            FieldValue::Text("2024-01-01".to_string()),
        ],
    )
    .unwrap()
}

/// Create, populate, and finish a store
fn build_store(path: &Path, entries: &[(i32, &str)]) {
    let mut writer = StoreWriter::create(path, Schema::customer()).unwrap();
    for (id, name) in entries {
        writer.append(&customer(*id, name)).unwrap();
    }
    writer.finish().unwrap();
}

fn scan_keys(reader: &StoreReader) -> Vec<i32> {
    reader.scan().unwrap().map(|r| r.unwrap().key()).collect()
}

fn scan_names(reader: &StoreReader) -> Vec<String> {
    reader
        .scan()
        .unwrap()
        .map(|r| r.unwrap().values()[1].as_text().unwrap().to_string())
        .collect()
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[test]
fn test_scan_returns_ascending_key_order() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(3, "Carol"), (1, "Alice"), (2, "Bob")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![1, 2, 3]);
}

#[test]
fn test_duplicate_keys_keep_insertion_order() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice"), (2, "Bob"), (1, "Carol")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![1, 1, 2]);
    assert_eq!(scan_names(&reader), vec!["Alice", "Carol", "Bob"]);
}

#[test]
fn test_many_appends_scan_sorted() {
    let (_temp, path) = setup_temp_store();

    let mut writer = StoreWriter::create(&path, Schema::customer()).unwrap();
    for i in 0..500u32 {
        // Deliberately unsorted key sequence
        let id = ((i * 7919) % 500 + 1) as i32;
        writer.append(&customer(id, "Bulk")).unwrap();
    }
    writer.finish().unwrap();

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    let keys = scan_keys(&reader);
    assert_eq!(keys.len(), 500);
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[test]
fn test_cursor_exhaustion_is_terminal() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice"), (2, "Bob")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    let mut cursor = reader.scan().unwrap();

    assert!(cursor.next().is_some());
    assert!(cursor.next().is_some());

    // Every call after end-of-store keeps returning None
    assert!(cursor.next().is_none());
    assert!(cursor.next().is_none());
    assert!(cursor.next().is_none());
}

#[test]
fn test_empty_store_cursor_is_immediately_exhausted() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    let mut cursor = reader.scan().unwrap();

    assert!(cursor.next().is_none());
    assert!(cursor.next().is_none());
}

#[test]
fn test_multiple_cursors_are_independent() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice"), (2, "Bob"), (3, "Carol")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    let mut first = reader.scan().unwrap();
    let mut second = reader.scan().unwrap();

    // Interleaved advancement; each cursor sees the full sequence
    assert_eq!(first.next().unwrap().unwrap().key(), 1);
    assert_eq!(second.next().unwrap().unwrap().key(), 1);
    assert_eq!(first.next().unwrap().unwrap().key(), 2);
    assert_eq!(first.next().unwrap().unwrap().key(), 3);
    assert_eq!(second.next().unwrap().unwrap().key(), 2);
    assert!(first.next().is_none());
    assert_eq!(second.next().unwrap().unwrap().key(), 3);
    assert!(second.next().is_none());
}

// =============================================================================
// Count Tests
// =============================================================================

#[test]
fn test_count_matches_scan() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(5, "E"), (3, "C"), (5, "E2"), (1, "A")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(reader.count().unwrap(), scan_keys(&reader).len() as u64);
}

#[test]
fn test_count_does_not_disturb_a_held_cursor() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice"), (2, "Bob"), (3, "Carol")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    let mut cursor = reader.scan().unwrap();
    assert_eq!(cursor.next().unwrap().unwrap().key(), 1);

    // Counting uses a fresh cursor, never the held one
    assert_eq!(reader.count().unwrap(), 3);

    assert_eq!(cursor.next().unwrap().unwrap().key(), 2);
    assert_eq!(cursor.next().unwrap().unwrap().key(), 3);
    assert!(cursor.next().is_none());
}

#[test]
fn test_empty_store_count_is_zero() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(reader.count().unwrap(), 0);
}

// =============================================================================
// Writer Tests
// =============================================================================

#[test]
fn test_writer_record_count() {
    let (_temp, path) = setup_temp_store();

    let mut writer = StoreWriter::create(&path, Schema::customer()).unwrap();
    assert_eq!(writer.record_count(), 0);
    writer.append(&customer(1, "Alice")).unwrap();
    writer.append(&customer(2, "Bob")).unwrap();
    assert_eq!(writer.record_count(), 2);
}

#[test]
fn test_create_truncates_existing_store() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice"), (2, "Bob"), (3, "Carol")]);
    build_store(&path, &[(9, "Zoe")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![9]);
}

// =============================================================================
// Open Failure Tests
// =============================================================================

#[test]
fn test_open_missing_file_fails() {
    let (_temp, path) = setup_temp_store();
    // Never created

    let result = StoreReader::open(&path, Schema::customer());
    assert!(matches!(result, Err(IsamError::StoreOpen(_))));
}

#[test]
fn test_open_partial_trailing_record_fails() {
    let (_temp, path) = setup_temp_store();

    // One whole record plus ten stray bytes
    fs::write(&path, vec![0u8; 195]).unwrap();

    let result = StoreReader::open(&path, Schema::customer());
    assert!(matches!(
        result,
        Err(IsamError::MalformedRecord { actual: 10, .. })
    ));
}

// =============================================================================
// Index Sidecar Tests
// =============================================================================

#[test]
fn test_finish_writes_index_sidecar() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice")]);

    assert!(sidecar_path(&path).exists());
}

#[test]
fn test_open_without_sidecar_rebuilds() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(1, "Alice"), (2, "Bob"), (1, "Carol")]);

    fs::remove_file(sidecar_path(&path)).unwrap();

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![1, 1, 2]);
    assert_eq!(scan_names(&reader), vec!["Alice", "Carol", "Bob"]);
}

#[test]
fn test_open_with_garbage_sidecar_rebuilds() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(2, "Bob"), (1, "Alice")]);

    fs::write(sidecar_path(&path), b"GARBAGE_NOT_AN_INDEX").unwrap();

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![1, 2]);
}

#[test]
fn test_open_with_bitflipped_payload_rebuilds() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(2, "Bob"), (1, "Alice")]);

    // Flip one payload byte; the header still looks valid, so only the
    // checksum catches it
    let idx = sidecar_path(&path);
    let mut bytes = fs::read(&idx).unwrap();
    bytes[20] ^= 0xFF;
    fs::write(&idx, bytes).unwrap();

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![1, 2]);
}

#[test]
fn test_open_with_stale_sidecar_rebuilds() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(2, "Bob"), (3, "Carol")]);

    // Append one raw record behind the sidecar's back
    let mut raw = vec![b' '; 185];
    raw[0..4].copy_from_slice(&1i32.to_ne_bytes());
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&raw).unwrap();

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(reader.count().unwrap(), 3);
    assert_eq!(scan_keys(&reader), vec![1, 2, 3]);
}

#[test]
fn test_reopen_uses_sidecar_ordering() {
    let (_temp, path) = setup_temp_store();
    build_store(&path, &[(10, "Ten"), (-5, "Neg"), (10, "TenAgain"), (0, "Zero")]);

    let reader = StoreReader::open(&path, Schema::customer()).unwrap();
    assert_eq!(scan_keys(&reader), vec![-5, 0, 10, 10]);
    assert_eq!(scan_names(&reader), vec!["Neg", "Zero", "Ten", "TenAgain"]);
}
