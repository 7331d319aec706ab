//! Session ledger: the single implementation of start/stop/force-stop.
//! Every entry point (self-service CLI, admin on-behalf-of, force-stop)
//! goes through these functions; there is no second copy of the rules.
//!
//! Each mutation runs in one IMMEDIATE transaction together with the
//! aggregate recompute, so a reader never observes a half-updated record.

use crate::core::aggregate::{provisional_hours, recompute_record};
use crate::core::rates::RateProvider;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    active_session, close_session, insert_record, insert_session, load_record, load_record_by_id,
};
use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::session::Session;
use crate::models::status::DayStatus;
use crate::utils::user::validate_user_id;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::TransactionBehavior;

/// Result of a start request.
#[derive(Debug)]
pub struct StartOutcome {
    /// True when an open session already existed and was returned as-is.
    pub already_active: bool,
    pub session: Session,
    pub record: DayRecord,
}

/// Result of a stop request. `session` is None when nothing was active
/// (a no-op success, not an error).
#[derive(Debug)]
pub struct StopOutcome {
    pub session: Option<Session>,
    pub record: Option<DayRecord>,
}

#[derive(Debug)]
pub struct ForceStopOutcome {
    pub closed_count: usize,
    pub record: DayRecord,
}

/// Read-only view of the open session, hours computed on demand.
#[derive(Debug)]
pub struct ActiveStatus {
    pub has_active: bool,
    pub current_hours: Option<f64>,
    pub session: Option<Session>,
}

/// Force-stop target: today's record of a user, or any record by id.
pub enum ForceTarget<'a> {
    User(&'a str),
    Record(i64),
}

pub struct Ledger;

impl Ledger {
    /// Open a session for (user, date) at the given time.
    ///
    /// Idempotent: if a session is already open for that day, it is
    /// returned unchanged instead of failing. The partial unique index on
    /// sessions backstops the invariant if two writers race past the
    /// lookup.
    pub fn start(
        pool: &mut DbPool,
        rates: &dyn RateProvider,
        user: &str,
        date: NaiveDate,
        at: NaiveTime,
        late_threshold_minutes: i64,
        stamp: &str,
    ) -> AppResult<StartOutcome> {
        validate_user_id(user)?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(existing) = active_session(&tx, user, &date)? {
            let record = load_record_by_id(&tx, existing.record_id)?.ok_or_else(|| {
                AppError::NotFound(format!("day record {}", existing.record_id))
            })?;
            // nothing written; drop the transaction as-is
            return Ok(StartOutcome {
                already_active: true,
                session: existing,
                record,
            });
        }

        let record_id = match load_record(&tx, user, &date)? {
            Some(rec) => rec.id,
            None => insert_record(&tx, user, &date, DayStatus::Present, stamp)?,
        };

        let session_id = insert_session(&tx, record_id, user, &date, at, stamp)?;

        let record = recompute_record(&tx, rates, record_id, late_threshold_minutes)?;

        ttlog(
            &tx,
            "start",
            user,
            &format!("session {} opened at {} on {}", session_id, at.format("%H:%M"), date),
        )?;

        tx.commit()?;

        let session = record
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| AppError::Other(format!("session {} vanished", session_id)))?;

        Ok(StartOutcome {
            already_active: false,
            session,
            record,
        })
    }

    /// Close the open session for (user, date), computing worked hours.
    /// A check-out earlier than the check-in means the session crossed
    /// midnight and is handled by the shared calculator.
    ///
    /// With nothing active this is a no-op success: callers get
    /// `session: None` and decide how to report it.
    pub fn stop(
        pool: &mut DbPool,
        rates: &dyn RateProvider,
        user: &str,
        date: NaiveDate,
        at: NaiveTime,
        late_threshold_minutes: i64,
    ) -> AppResult<StopOutcome> {
        validate_user_id(user)?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(open) = active_session(&tx, user, &date)? else {
            let record = load_record(&tx, user, &date)?;
            return Ok(StopOutcome {
                session: None,
                record,
            });
        };

        close_session(&tx, open.id, at, None)?;

        let record = recompute_record(&tx, rates, open.record_id, late_threshold_minutes)?;

        ttlog(
            &tx,
            "stop",
            user,
            &format!("session {} closed at {} on {}", open.id, at.format("%H:%M"), date),
        )?;

        tx.commit()?;

        let session = record.sessions.iter().find(|s| s.id == open.id).cloned();

        Ok(StopOutcome { session, record: Some(record) })
    }

    /// Admin override: close every dangling open session on the target
    /// record, stamping provenance. Shares the close + recompute path with
    /// the normal stop; only the stamps differ.
    ///
    /// Strict by design: zero open sessions is an error here, because an
    /// admin invoking this expects something to be dangling.
    pub fn force_stop(
        pool: &mut DbPool,
        rates: &dyn RateProvider,
        target: ForceTarget,
        admin: &str,
        date: NaiveDate,
        at: NaiveTime,
        late_threshold_minutes: i64,
        stamp: &str,
    ) -> AppResult<ForceStopOutcome> {
        validate_user_id(admin)?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let record = match target {
            ForceTarget::User(user) => {
                validate_user_id(user)?;
                load_record(&tx, user, &date)?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("no day record for {} on {}", user, date))
                    })?
            }
            ForceTarget::Record(id) => load_record_by_id(&tx, id)?
                .ok_or_else(|| AppError::NotFound(format!("day record {}", id)))?,
        };

        let open: Vec<i64> = record
            .sessions
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.id)
            .collect();

        if open.is_empty() {
            return Err(AppError::NotFound(format!(
                "no open session for {} on {}",
                record.user_id, record.date
            )));
        }

        for id in &open {
            close_session(&tx, *id, at, Some((admin, stamp)))?;
        }

        let updated = recompute_record(&tx, rates, record.id, late_threshold_minutes)?;

        ttlog(
            &tx,
            "force_stop",
            &record.user_id,
            &format!(
                "{} session(s) force-stopped by {} at {} on {}",
                open.len(),
                admin,
                at.format("%H:%M"),
                record.date
            ),
        )?;

        tx.commit()?;

        Ok(ForceStopOutcome {
            closed_count: open.len(),
            record: updated,
        })
    }

    /// Read path: is a session open, and how many hours has it run so far.
    /// Never fails on absence.
    pub fn active_status(
        pool: &mut DbPool,
        user: &str,
        date: NaiveDate,
        now: NaiveTime,
    ) -> AppResult<ActiveStatus> {
        validate_user_id(user)?;

        match active_session(&pool.conn, user, &date)? {
            Some(s) => {
                let hours = provisional_hours(&s, now);
                Ok(ActiveStatus {
                    has_active: true,
                    current_hours: Some(hours),
                    session: Some(s),
                })
            }
            None => Ok(ActiveStatus {
                has_active: false,
                current_hours: None,
                session: None,
            }),
        }
    }
}
