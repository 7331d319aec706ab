use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check whether a migration has already been recorded in the log table.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the attendance tables with the modern schema.
fn create_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS day_records (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT NOT NULL,
            date            TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'present'
                            CHECK(status IN ('present','absent','leave','late')),
            original_status TEXT NOT NULL DEFAULT 'present'
                            CHECK(original_status IN ('present','absent','leave','late')),
            check_in_time   TEXT,
            check_out_time  TEXT,
            total_hours     REAL NOT NULL DEFAULT 0,
            daily_salary    REAL NOT NULL DEFAULT 0,
            hourly_rate     REAL NOT NULL DEFAULT 0,
            is_late         INTEGER NOT NULL DEFAULT 0,
            late_minutes    INTEGER NOT NULL DEFAULT 0,
            edited_at       TEXT,
            edited_by       TEXT,
            created_at      TEXT NOT NULL,
            UNIQUE (user_id, date)
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            record_id        INTEGER NOT NULL REFERENCES day_records(id) ON DELETE CASCADE,
            user_id          TEXT NOT NULL,
            date             TEXT NOT NULL,
            seq              INTEGER NOT NULL DEFAULT 0,
            check_in_time    TEXT NOT NULL,
            check_out_time   TEXT,
            is_active        INTEGER NOT NULL DEFAULT 1,
            hours_worked     REAL NOT NULL DEFAULT 0,
            session_salary   REAL NOT NULL DEFAULT 0,
            force_stopped    INTEGER NOT NULL DEFAULT 0,
            force_stopped_by TEXT,
            force_stopped_at TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rates (
            user_id     TEXT PRIMARY KEY,
            hourly_rate REAL NOT NULL DEFAULT 0,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_day_records_user_date ON day_records(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_sessions_record ON sessions(record_id, seq);

        -- Storage-level backstop for the at-most-one-active-session invariant.
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_active
            ON sessions(user_id, date) WHERE is_active = 1;
        "#,
    )?;
    Ok(())
}

/// 0.3.0: earlier builds stored the rate snapshot only on sessions.
fn migrate_add_hourly_rate_column(conn: &Connection) -> Result<()> {
    let version = "20250812_0003_add_hourly_rate_snapshot";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let mut stmt = conn.prepare("PRAGMA table_info('day_records')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut has_col = false;
    for c in cols {
        if c? == "hourly_rate" {
            has_col = true;
            break;
        }
    }

    if !has_col {
        conn.execute(
            "ALTER TABLE day_records ADD COLUMN hourly_rate REAL NOT NULL DEFAULT 0;",
            [],
        )?;
        success(format!(
            "Migration applied: {} → added 'hourly_rate' to day_records",
            version
        ));
    }

    mark_migration(conn, version, "Added hourly_rate snapshot to day_records")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create attendance tables if missing
    if !table_exists(conn, "day_records")? {
        create_attendance_tables(conn)?;
        success("Created attendance tables (modern schema).");
    } else {
        // idempotent index creation for databases made by older builds
        create_attendance_tables(conn)?;
        migrate_add_hourly_rate_column(conn)?;
    }

    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    Ok(())
}
