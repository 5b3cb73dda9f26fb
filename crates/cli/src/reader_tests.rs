// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::TempDir;

#[test]
fn reads_small_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("small.txt");
    std::fs::write(&path, "hello").unwrap();

    let content = FileReader::new().read(&path).unwrap();

    assert_eq!(content.text.as_deref(), Some("hello"));
    assert_eq!(content.size, 5);
}

#[test]
fn rejects_oversized_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("big.txt");
    std::fs::write(&path, vec![b'x'; 2048]).unwrap();

    let result = FileReader::with_max_size(1024).read(&path);

    match result {
        Err(Error::FileTooLarge { size, max_size, .. }) => {
            assert_eq!(size, 2048);
            assert_eq!(max_size, 1024);
        }
        other => panic!("expected FileTooLarge, got {:?}", other),
    }
}

#[test]
fn non_utf8_file_has_no_text() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("blob.bin");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x81]).unwrap();

    let content = FileReader::new().read(&path).unwrap();

    assert!(content.text.is_none());
    assert_eq!(content.size, 4);
}

#[test]
fn missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let result = FileReader::new().read(&tmp.path().join("nope.txt"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn default_limit_is_ten_megabytes() {
    assert_eq!(FileReader::default().max_size(), MAX_FILE_SIZE);
    assert_eq!(MAX_FILE_SIZE, 10 * 1024 * 1024);
}
