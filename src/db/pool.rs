//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Serialize writers at the engine level; mutations run in
        // IMMEDIATE transactions on top of this.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        // per-connection pragma, needed for session cascade on delete
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }
}
