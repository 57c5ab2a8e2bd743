#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rhc() -> Command {
    cargo_bin_cmd!("rheadcount")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rheadcount.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB (schema only, no config file) and register one location.
/// The location gets id 1.
pub fn init_db_with_location(db_path: &str, name: &str) {
    rhc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rhc()
        .args(["--db", db_path, "location", "add", name])
        .assert()
        .success();
}
