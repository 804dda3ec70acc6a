// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report cache specs: showing, drafting and clearing the local snapshot,
//! and what refresh and sync do without connectivity.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    temp: TempDir,
    config: PathBuf,
}

fn setup() -> Workspace {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "api_base_url = \"http://127.0.0.1:9\"\nstore_path = {:?}\nindicator_file = {:?}\n",
            temp.path().join("offline.db").display().to_string(),
            temp.path().join("offline").display().to_string(),
        ),
    )
    .unwrap();
    Workspace { temp, config }
}

impl Workspace {
    fn rhsync(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rhsync");
        cmd.arg("--config")
            .arg(&self.config)
            .arg("--offline")
            .env("NO_COLOR", "1")
            .env_remove("RHSYNC_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn cache_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .rhsync()
            .args(["cache", "show", "-o", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn empty_cache() {
    let ws = setup();
    ws.rhsync()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached reports."));
    assert!(ws.cache_json().is_empty());
}

#[test]
fn draft_is_cached_with_local_id() {
    let ws = setup();
    ws.rhsync()
        .args(["cache", "draft", "-t", "Dark street", "-c", "lighting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drafted report -1: Dark street"));

    let cached = ws.cache_json();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0]["id"], -1);
    assert_eq!(cached[0]["status"], "local");
    assert_eq!(cached[0]["category"], "lighting");

    ws.rhsync()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local"))
        .stdout(predicate::str::contains("[lighting]"));
}

#[test]
fn drafts_get_decreasing_ids() {
    let ws = setup();
    for title in ["One", "Two"] {
        ws.rhsync()
            .args(["cache", "draft", "-t", title])
            .assert()
            .success();
    }
    let ids: Vec<_> = ws.cache_json().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![-2, -1]);
}

#[test]
fn blank_draft_title_is_rejected() {
    let ws = setup();
    ws.rhsync()
        .args(["cache", "draft", "-t", " "])
        .assert()
        .failure();
    assert!(ws.cache_json().is_empty());
}

#[test]
fn clear_empties_cache() {
    let ws = setup();
    ws.rhsync()
        .args(["cache", "draft", "-t", "Temp"])
        .assert()
        .success();
    ws.rhsync()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));
    assert!(ws.cache_json().is_empty());
}

#[test]
fn refresh_offline_fails_and_keeps_cache() {
    let ws = setup();
    ws.rhsync()
        .args(["cache", "draft", "-t", "Keep me"])
        .assert()
        .success();

    ws.rhsync()
        .args(["cache", "refresh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the cache was not refreshed"));

    assert_eq!(ws.cache_json().len(), 1);
}

#[test]
fn sync_offline_fails() {
    let ws = setup();
    ws.rhsync()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("full sync needs the API"));
}

#[test]
fn unavailable_store_reads_as_empty_cache() {
    let ws = setup();
    // A regular file where the store's parent directory should be.
    let blocker = ws.temp.path().join("blocked");
    fs::write(&blocker, "").unwrap();
    fs::write(
        &ws.config,
        format!("store_path = {:?}\n", blocker.join("offline.db").display().to_string()),
    )
    .unwrap();

    ws.rhsync()
        .args(["cache", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached reports."));

    ws.rhsync()
        .args(["queue", "create", "-t", "Lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("offline store is not available"));
}
