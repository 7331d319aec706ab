use crate::db::pool::DbPool;
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("• File: {}", db_path);
    println!("• Size: {:.2} MB", file_mb);

    //
    // 2) TOTALS
    //
    let records: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM day_records", [], |row| row.get(0))?;
    let sessions: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE is_active = 1",
        [],
        |row| row.get(0),
    )?;
    let users: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT user_id) FROM day_records",
        [],
        |row| row.get(0),
    )?;

    println!("• Day records:   {}", records);
    println!("• Sessions:      {} ({} open)", sessions, open);
    println!("• Users tracked: {}", users);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM day_records ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM day_records ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("• Date range:");
    println!("    from: {}", first_date.clone().unwrap_or_else(|| "--".into()));
    println!("    to:   {}", last_date.clone().unwrap_or_else(|| "--".into()));

    //
    // 4) AVERAGE RECORDS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date) {
        let d1 = parse_date(&f)?;
        let d2 = parse_date(&l)?;
        let days = (d2 - d1).num_days().max(1);

        let avg = records as f64 / days as f64;
        println!("• Average records/day: {:.2}", avg);
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
