#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimesheet.sqlite", name));
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

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    // init DB (creates tables)
    rts()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    // one clocked day: 09:00-17:00 with 30m lunch = 7.5h worked
    rts()
        .args([
            "--db",
            db_path,
            "day",
            "2024-12-30",
            "--in",
            "09:00",
            "--lunch",
            "30",
            "--out",
            "17:00",
        ])
        .assert()
        .success();

    // one leave day in the same week
    rts()
        .args(["--db", db_path, "quick", "2024-12-31", "leave"])
        .assert()
        .success();
}

/// Open an initialized in-memory style connection against a file DB for
/// direct library-level checks.
pub fn open_db(db_path: &str) -> rusqlite::Connection {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    rtimesheet::db::initialize::init_db(&conn).expect("init db");
    conn
}
