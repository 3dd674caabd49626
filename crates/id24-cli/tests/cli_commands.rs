#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable
//! Integration tests for the `id24` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a table file mixing vanilla, MBF21, and ID24 records.
fn test_tables() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(
        &path,
        r#"{
    "sprites": [{"index": 0, "sprite": "TROO"}],
    "states": [
        {"index": 0, "tics": -1},
        {"index": 1, "sprite": 0, "tics": 10, "action": "A_Look", "nextstate": 1},
        {"index": 2, "minimum_features": "mbf21", "tics": 4, "action": "A_SpawnObject",
         "nextstate": 1, "mbf21": {"args": [11, 0, 0, 0, 0, 0, 0, 0]}}
    ],
    "mobjinfo": [
        {"index": 11, "minimum_features": "mbf21", "doomednum": 3001, "spawnhealth": 60,
         "mbf21": {"fastspeed": 1048576, "ripsound": 42}}
    ],
    "ammo": [
        {"index": -1879048192, "minimum_features": "id24", "clipammo": 20, "maxammo": 150,
         "id24": {"skillmul": [131072, 65536, 65536, 65536, 131072]}}
    ]
}"#,
    )
    .unwrap();
    (dir, path)
}

fn id24() -> Command {
    Command::cargo_bin("id24").unwrap()
}

// ---------------------------------------------------------------------------
// tiers
// ---------------------------------------------------------------------------

#[test]
fn tiers_lists_every_tier_in_order() {
    id24()
        .arg("tiers")
        .assert()
        .success()
        .stdout(predicate::str::contains("vanilla"))
        .stdout(predicate::str::contains("mbf21-extended"))
        .stdout(predicate::str::contains("id24"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_at_id24_is_clean() {
    let (_dir, path) = test_tables();
    id24()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("mobjinfo"))
        .stdout(predicate::str::contains("All records load"));
}

#[test]
fn check_at_mbf_reports_degraded_records() {
    let (_dir, path) = test_tables();
    id24()
        .args(["check", "--tier", "mbf"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("11"))
        .stdout(predicate::str::contains("-1879048192"))
        .stdout(predicate::str::contains("degraded to"));
}

#[test]
fn check_with_reject_policy_fails() {
    let (_dir, path) = test_tables();
    id24()
        .args(["check", "--tier", "mbf", "--policy", "reject"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires mbf21"));
}

#[test]
fn check_rejects_unknown_codepointers_unless_allowed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(&path, r#"{"states": [{"index": 7, "action": "A_Teleport"}]}"#).unwrap();

    id24()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown codepointer `A_Teleport`"));

    id24()
        .args(["check", "--allow-unknown-codepointers"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("degraded to"));
}

#[test]
fn check_unknown_tier_fails() {
    let (_dir, path) = test_tables();
    id24()
        .args(["check", "--tier", "doom64"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown feature tier"));
}

#[test]
fn check_missing_file_fails() {
    id24()
        .args(["check", "/nonexistent/tables.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_at_id24_includes_extension_fields() {
    let (_dir, path) = test_tables();
    id24()
        .arg("show")
        .arg(&path)
        .args(["mobjinfo", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spawnhealth"))
        .stdout(predicate::str::contains("mbf21.ripsound"))
        .stdout(predicate::str::contains("gated").not());
}

#[test]
fn show_at_mbf_gates_mbf21_fields() {
    let (_dir, path) = test_tables();
    id24()
        .arg("show")
        .arg(&path)
        .args(["mobjinfo", "11", "--tier", "mbf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spawnhealth"))
        .stdout(predicate::str::contains("mbf21.fastspeed").not())
        .stdout(predicate::str::contains("requires mbf21"));
}

#[test]
fn show_accepts_negative_indices() {
    let (_dir, path) = test_tables();
    id24()
        .arg("show")
        .arg(&path)
        .args(["ammo", "-1879048192"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id24.skillmul"));
}

#[test]
fn show_unknown_table_fails() {
    let (_dir, path) = test_tables();
    id24()
        .arg("show")
        .arg(&path)
        .args(["things", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown table"));
}

#[test]
fn show_missing_record_fails() {
    let (_dir, path) = test_tables();
    id24()
        .arg("show")
        .arg(&path)
        .args(["states", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record 99 in states"));
}
