// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::tempdir;

#[test]
fn log_indicator_is_idempotent() {
    let indicator = LogIndicator::new();
    assert!(!indicator.is_visible());

    indicator.show();
    indicator.show();
    assert!(indicator.is_visible());

    indicator.hide();
    indicator.hide();
    assert!(!indicator.is_visible());
}

#[test]
fn file_indicator_writes_and_removes_marker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("offline");
    let indicator = FileIndicator::new(&path);

    assert!(!indicator.is_visible());
    indicator.hide();

    indicator.show();
    assert!(indicator.is_visible());
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.trim(), OFFLINE_MESSAGE);

    indicator.show();
    assert!(indicator.is_visible());

    indicator.hide();
    assert!(!indicator.is_visible());
    assert!(!path.exists());
}
