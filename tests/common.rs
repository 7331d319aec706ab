#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize DB schema via the CLI (uses --test to leave the user's config alone)
pub fn init_test_db(db_path: &str) {
    rat()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add a closed one-session day useful for many tests
pub fn init_db_with_data(db_path: &str) {
    init_test_db(db_path);

    rat()
        .args(["--db", db_path, "rate", "--user", "mrossi", "--set", "20"])
        .assert()
        .success();

    rat()
        .args([
            "--db", db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "09:00",
        ])
        .assert()
        .success();

    rat()
        .args([
            "--db", db_path, "stop", "--user", "mrossi", "--date", "2025-09-01", "--at", "17:00",
        ])
        .assert()
        .success();
}

/// Open a plain rusqlite connection for direct assertions on stored rows
pub fn open_db(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}
