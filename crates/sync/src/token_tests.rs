// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::tempdir;

#[test]
fn static_token() {
    assert_eq!(StaticToken::new("abc").token().as_deref(), Some("abc"));
    assert_eq!(StaticToken::default().token(), None);
}

#[test]
fn file_token_trims_and_rereads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");
    let source = FileToken::new(&path);

    assert_eq!(source.token(), None);

    std::fs::write(&path, "first\n").unwrap();
    assert_eq!(source.token().as_deref(), Some("first"));

    std::fs::write(&path, "second").unwrap();
    assert_eq!(source.token().as_deref(), Some("second"));
}

#[test]
fn file_token_blank_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "  \n").unwrap();
    assert_eq!(FileToken::new(&path).token(), None);
}

#[test]
fn env_token_missing_var_is_none() {
    let source = EnvToken::new("RH_SYNC_TEST_TOKEN_THAT_IS_NEVER_SET");
    assert_eq!(source.token(), None);
}
