//! Day-record recomputation.
//! Runs after every session mutation, inside the caller's transaction, and
//! rewrites all derived fields from the stored sessions. Idempotent: with
//! no intervening session change, a second run writes identical values.

use crate::core::calculator::{hours_between, lateness_for, round4, salary_for};
use crate::core::rates::RateProvider;
use crate::db::queries::{
    load_record_by_id, update_record_derived, update_session_derived,
};
use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::session::Session;
use chrono::NaiveTime;
use rusqlite::Connection;

/// Recompute and persist all derived fields of a day record.
/// Fetches the current hourly rate once and snapshots it into the record;
/// a rate of 0 (unset) forces every monetary field to 0.
pub fn recompute_record(
    conn: &Connection,
    rates: &dyn RateProvider,
    record_id: i64,
    late_threshold_minutes: i64,
) -> AppResult<DayRecord> {
    let mut rec = load_record_by_id(conn, record_id)?
        .ok_or_else(|| AppError::NotFound(format!("day record {}", record_id)))?;

    let rate = rates.hourly_rate(conn, &rec.user_id)?;
    let rate = if rate > 0.0 { rate } else { 0.0 };

    let mut total_hours = 0.0;
    let mut daily_salary = 0.0;

    for s in rec.sessions.iter_mut() {
        // open sessions persist 0 until closed; provisional hours are a
        // read-path concern (see provisional_hours)
        let hours = if s.is_active {
            0.0
        } else {
            hours_between(Some(s.check_in_time), s.check_out_time)
        };
        let salary = salary_for(hours, rate, rec.status);

        if s.hours_worked != hours || s.session_salary != salary {
            update_session_derived(conn, s.id, hours, salary)?;
        }
        s.hours_worked = hours;
        s.session_salary = salary;

        total_hours += hours;
        daily_salary += salary;
    }

    // non-worked statuses zero out the day totals; per-session detail stays
    let (total_hours, daily_salary) = if rec.status.is_payable() {
        (round4(total_hours), round4(daily_salary))
    } else {
        (0.0, 0.0)
    };

    // legacy single-session mirrors: first in, last out
    let first_in = rec.sessions.first().map(|s| s.check_in_time);
    let last_out = rec.sessions.last().and_then(|s| s.check_out_time);

    let (is_late, late_minutes) = lateness_for(first_in, rec.status, late_threshold_minutes);

    update_record_derived(
        conn,
        rec.id,
        first_in.map(|t| t.format("%H:%M").to_string()),
        last_out.map(|t| t.format("%H:%M").to_string()),
        total_hours,
        daily_salary,
        rate,
        is_late,
        late_minutes,
    )?;

    rec.check_in_time = first_in;
    rec.check_out_time = last_out;
    rec.total_hours = total_hours;
    rec.daily_salary = daily_salary;
    rec.hourly_rate = rate;
    rec.is_late = is_late;
    rec.late_minutes = late_minutes;

    Ok(rec)
}

/// Hours an open session has accumulated so far, against the given clock
/// time. Read-only: never persisted.
pub fn provisional_hours(session: &Session, now: NaiveTime) -> f64 {
    if !session.is_active {
        return session.hours_worked;
    }
    hours_between(Some(session.check_in_time), Some(now))
}
