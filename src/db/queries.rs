use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::session::Session;
use crate::models::status::DayStatus;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

fn parse_date_col(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.to_string())),
        )
    })
}

fn parse_time_col(time_str: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(time_str.to_string())),
        )
    })
}

fn parse_status_col(s: &str) -> Result<DayStatus> {
    DayStatus::from_db_str(s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(s.to_string())),
        )
    })
}

pub fn map_session_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("date")?;
    let in_str: String = row.get("check_in_time")?;
    let out_str: Option<String> = row.get("check_out_time")?;

    let check_out_time = match out_str {
        Some(s) if !s.is_empty() => Some(parse_time_col(&s)?),
        _ => None,
    };

    Ok(Session {
        id: row.get("id")?,
        record_id: row.get("record_id")?,
        user_id: row.get("user_id")?,
        date: parse_date_col(&date_str)?,
        seq: row.get("seq")?,
        check_in_time: parse_time_col(&in_str)?,
        check_out_time,
        is_active: row.get::<_, i32>("is_active")? == 1,
        hours_worked: row.get("hours_worked")?,
        session_salary: row.get("session_salary")?,
        force_stopped: row.get::<_, i32>("force_stopped")? == 1,
        force_stopped_by: row.get("force_stopped_by")?,
        force_stopped_at: row.get("force_stopped_at")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_record_row(row: &Row) -> Result<DayRecord> {
    let date_str: String = row.get("date")?;
    let status_str: String = row.get("status")?;
    let orig_str: String = row.get("original_status")?;

    let check_in: Option<String> = row.get("check_in_time")?;
    let check_out: Option<String> = row.get("check_out_time")?;

    let check_in_time = match check_in {
        Some(s) if !s.is_empty() => Some(parse_time_col(&s)?),
        _ => None,
    };
    let check_out_time = match check_out {
        Some(s) if !s.is_empty() => Some(parse_time_col(&s)?),
        _ => None,
    };

    Ok(DayRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: parse_date_col(&date_str)?,
        status: parse_status_col(&status_str)?,
        original_status: parse_status_col(&orig_str)?,
        check_in_time,
        check_out_time,
        total_hours: row.get("total_hours")?,
        daily_salary: row.get("daily_salary")?,
        hourly_rate: row.get("hourly_rate")?,
        is_late: row.get::<_, i32>("is_late")? == 1,
        late_minutes: row.get("late_minutes")?,
        edited_at: row.get("edited_at")?,
        edited_by: row.get("edited_by")?,
        created_at: row.get("created_at")?,
        sessions: Vec::new(),
    })
}

pub fn load_sessions_for_record(conn: &Connection, record_id: i64) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM sessions WHERE record_id = ?1 ORDER BY seq ASC, id ASC",
    )?;
    let rows = stmt.query_map([record_id], map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn attach_sessions(conn: &Connection, mut rec: DayRecord) -> AppResult<DayRecord> {
    rec.sessions = load_sessions_for_record(conn, rec.id)?;
    Ok(rec)
}

/// Load the day record for (user, date), sessions included.
pub fn load_record(conn: &Connection, user: &str, date: &NaiveDate) -> AppResult<Option<DayRecord>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut stmt =
        conn.prepare_cached("SELECT * FROM day_records WHERE user_id = ?1 AND date = ?2")?;

    let rec = stmt
        .query_row(params![user, date_str], map_record_row)
        .optional()?;

    match rec {
        Some(r) => Ok(Some(attach_sessions(conn, r)?)),
        None => Ok(None),
    }
}

/// Load a day record by primary key, sessions included.
pub fn load_record_by_id(conn: &Connection, id: i64) -> AppResult<Option<DayRecord>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM day_records WHERE id = ?1")?;
    let rec = stmt.query_row([id], map_record_row).optional()?;

    match rec {
        Some(r) => Ok(Some(attach_sessions(conn, r)?)),
        None => Ok(None),
    }
}

/// Insert a fresh day record and return its id.
pub fn insert_record(
    conn: &Connection,
    user: &str,
    date: &NaiveDate,
    status: DayStatus,
    created_at: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO day_records (user_id, date, status, original_status, created_at)
         VALUES (?1, ?2, ?3, ?3, ?4)",
        params![
            user,
            date.format("%Y-%m-%d").to_string(),
            status.to_db_str(),
            created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Append a new active session to a record. seq = current count.
pub fn insert_session(
    conn: &Connection,
    record_id: i64,
    user: &str,
    date: &NaiveDate,
    check_in: NaiveTime,
    created_at: &str,
) -> AppResult<i64> {
    let date_str = date.format("%Y-%m-%d").to_string();

    let seq: i32 = conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE record_id = ?1",
        [record_id],
        |r| r.get(0),
    )?;

    let insert = conn.execute(
        "INSERT INTO sessions
            (record_id, user_id, date, seq, check_in_time, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        params![
            record_id,
            user,
            date_str,
            seq,
            check_in.format("%H:%M").to_string(),
            created_at
        ],
    );

    match insert {
        Ok(_) => Ok(conn.last_insert_rowid()),
        // the partial unique index tripped: a concurrent writer already
        // opened a session for this (user, date)
        Err(rusqlite::Error::SqliteFailure(e, msg))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::Conflict(format!(
                "an active session already exists for {} on {}: {}",
                user,
                date_str,
                msg.unwrap_or_default()
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// The open session for (user, date), if any.
pub fn active_session(
    conn: &Connection,
    user: &str,
    date: &NaiveDate,
) -> AppResult<Option<Session>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM sessions WHERE user_id = ?1 AND date = ?2 AND is_active = 1",
    )?;
    Ok(stmt
        .query_row(params![user, date_str], map_session_row)
        .optional()?)
}

/// Close a session: set check-out, clear is_active, optionally stamp the
/// force-stop provenance. Hours/salary are written by the recompute step.
pub fn close_session(
    conn: &Connection,
    session_id: i64,
    check_out: NaiveTime,
    forced_by: Option<(&str, &str)>, // (admin, ISO timestamp)
) -> AppResult<()> {
    match forced_by {
        None => {
            conn.execute(
                "UPDATE sessions SET check_out_time = ?1, is_active = 0 WHERE id = ?2",
                params![check_out.format("%H:%M").to_string(), session_id],
            )?;
        }
        Some((admin, stamp)) => {
            conn.execute(
                "UPDATE sessions
                 SET check_out_time = ?1, is_active = 0,
                     force_stopped = 1, force_stopped_by = ?2, force_stopped_at = ?3
                 WHERE id = ?4",
                params![
                    check_out.format("%H:%M").to_string(),
                    admin,
                    stamp,
                    session_id
                ],
            )?;
        }
    }
    Ok(())
}

/// Persist derived session fields (recompute step).
pub fn update_session_derived(
    conn: &Connection,
    session_id: i64,
    hours_worked: f64,
    session_salary: f64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions SET hours_worked = ?1, session_salary = ?2 WHERE id = ?3",
        params![hours_worked, session_salary, session_id],
    )?;
    Ok(())
}

/// Persist derived day-record fields (recompute step).
#[allow(clippy::too_many_arguments)]
pub fn update_record_derived(
    conn: &Connection,
    record_id: i64,
    check_in: Option<String>,
    check_out: Option<String>,
    total_hours: f64,
    daily_salary: f64,
    hourly_rate: f64,
    is_late: bool,
    late_minutes: i64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE day_records
         SET check_in_time = ?1, check_out_time = ?2,
             total_hours = ?3, daily_salary = ?4, hourly_rate = ?5,
             is_late = ?6, late_minutes = ?7
         WHERE id = ?8",
        params![
            check_in,
            check_out,
            total_hours,
            daily_salary,
            hourly_rate,
            if is_late { 1 } else { 0 },
            late_minutes,
            record_id
        ],
    )?;
    Ok(())
}

/// Stamp an admin edit: status change plus provenance.
pub fn stamp_record_edit(
    conn: &Connection,
    record_id: i64,
    status: DayStatus,
    edited_by: &str,
    edited_at: &str,
) -> AppResult<()> {
    conn.execute(
        "UPDATE day_records SET status = ?1, edited_by = ?2, edited_at = ?3 WHERE id = ?4",
        params![status.to_db_str(), edited_by, edited_at, record_id],
    )?;
    Ok(())
}

/// Rewrite a session's times (admin correction path only).
pub fn update_session_times(
    conn: &Connection,
    session_id: i64,
    check_in: NaiveTime,
    check_out: Option<NaiveTime>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions
         SET check_in_time = ?1, check_out_time = ?2,
             is_active = CASE WHEN ?2 IS NULL THEN is_active ELSE 0 END
         WHERE id = ?3",
        params![
            check_in.format("%H:%M").to_string(),
            check_out.map(|t| t.format("%H:%M").to_string()),
            session_id
        ],
    )?;
    Ok(())
}

/// Delete a day record (sessions cascade). Admin-only path.
pub fn delete_record(conn: &Connection, user: &str, date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM day_records WHERE user_id = ?1 AND date = ?2",
        params![user, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

// Generic helper to build a listing query with optional period filter.
// Periods: YYYY, YYYY-MM, YYYY-MM-DD, or "start:end" ranges of equal grain.
fn build_filtered_query(
    base_query: &str,
    user: &str,
    period: Option<&str>,
) -> Result<(String, Vec<String>)> {
    let mut query = base_query.to_string();
    let mut conditions = vec!["user_id = ?".to_string()];
    let mut params: Vec<String> = vec![user.to_string()];

    if let Some(p) = period {
        if let Some((start_raw, end_raw)) = p.split_once(':') {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.is_empty() || end.is_empty() || start.len() != end.len() {
                return Err(rusqlite::Error::InvalidQuery);
            }

            match start.len() {
                4 => {
                    conditions.push("strftime('%Y', date) >= ?".to_string());
                    conditions.push("strftime('%Y', date) <= ?".to_string());
                    params.push(start.to_string());
                    params.push(end.to_string());
                }
                7 => {
                    conditions.push("strftime('%Y-%m', date) >= ?".to_string());
                    conditions.push("strftime('%Y-%m', date) <= ?".to_string());
                    params.push(start.to_string());
                    params.push(end.to_string());
                }
                10 => {
                    conditions.push("date >= ?".to_string());
                    conditions.push("date <= ?".to_string());
                    params.push(start.to_string());
                    params.push(end.to_string());
                }
                _ => return Err(rusqlite::Error::InvalidQuery),
            }
        } else if p.len() == 4 {
            conditions.push("strftime('%Y', date) = ?".to_string());
            params.push(p.to_string());
        } else if p.len() == 7 {
            conditions.push("strftime('%Y-%m', date) = ?".to_string());
            params.push(p.to_string());
        } else if p.len() == 10 {
            conditions.push("date = ?".to_string());
            params.push(p.to_string());
        } else {
            return Err(rusqlite::Error::InvalidQuery);
        }
    }

    query.push_str(" WHERE ");
    query.push_str(&conditions.join(" AND "));

    Ok((query, params))
}

/// List a user's day records, optionally filtered by period. Read-only:
/// sessions are attached, open sessions are left as stored.
pub fn list_records(
    conn: &Connection,
    user: &str,
    period: Option<&str>,
) -> AppResult<Vec<DayRecord>> {
    // "all" bypasses the period filter entirely
    let (mut query, params) = if let Some("all") = period {
        (
            "SELECT * FROM day_records WHERE user_id = ?".to_string(),
            vec![user.to_string()],
        )
    } else {
        build_filtered_query("SELECT * FROM day_records", user, period)?
    };

    query.push_str(" ORDER BY date ASC");

    let mut stmt = conn.prepare_cached(&query)?;
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|s| s as &dyn ToSql).collect();
    let rows = stmt.query_map(param_refs.as_slice(), map_record_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(attach_sessions(conn, r?)?);
    }
    Ok(out)
}
