// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::RHSYNC_CONFIG, "RHSYNC_CONFIG");
    assert_eq!(vars::REPORTHUB_TOKEN, "REPORTHUB_TOKEN");
    assert_eq!(vars::NO_COLOR, "NO_COLOR");
    assert_eq!(vars::COLOR, "COLOR");
    assert_eq!(default_token_var(), "REPORTHUB_TOKEN");
}

#[test]
fn test_no_color() {
    std::env::remove_var("NO_COLOR");
    assert!(!no_color());
    std::env::set_var("NO_COLOR", "true");
    assert!(!no_color());
    std::env::set_var("NO_COLOR", "1");
    assert!(no_color());
    std::env::remove_var("NO_COLOR");
}

#[test]
fn test_force_color() {
    std::env::remove_var("COLOR");
    assert!(!force_color());
    std::env::set_var("COLOR", "1");
    assert!(force_color());
    std::env::remove_var("COLOR");
}

#[test]
fn test_config_path() {
    std::env::remove_var("RHSYNC_CONFIG");
    assert_eq!(config_path(), None);
    std::env::set_var("RHSYNC_CONFIG", "");
    assert_eq!(config_path(), None);
    std::env::set_var("RHSYNC_CONFIG", "/tmp/rhsync.toml");
    assert_eq!(config_path(), Some(PathBuf::from("/tmp/rhsync.toml")));
    std::env::remove_var("RHSYNC_CONFIG");
}
