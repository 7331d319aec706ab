//! Admin correction path: rewrite a session's times or the day status.
//! The only sanctioned exception to check-in immutability; every edit is
//! stamped (edited_by/edited_at) and logged, and the first-ever status
//! stays preserved in original_status.

use crate::core::aggregate::recompute_record;
use crate::core::rates::RateProvider;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_record, stamp_record_edit, update_session_times};
use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::status::DayStatus;
use crate::utils::user::validate_user_id;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::TransactionBehavior;

pub struct EditLogic;

impl EditLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        pool: &mut DbPool,
        rates: &dyn RateProvider,
        user: &str,
        date: NaiveDate,
        new_status: Option<DayStatus>,
        session_seq: Option<usize>, // 1-based, as shown by `list`
        new_in: Option<NaiveTime>,
        new_out: Option<NaiveTime>,
        admin: &str,
        late_threshold_minutes: i64,
        stamp: &str,
    ) -> AppResult<DayRecord> {
        validate_user_id(user)?;
        validate_user_id(admin)?;

        if new_status.is_none() && new_in.is_none() && new_out.is_none() {
            return Err(AppError::Validation(
                "nothing to edit: specify --status, --in or --out".into(),
            ));
        }

        if (new_in.is_some() || new_out.is_some()) && session_seq.is_none() {
            return Err(AppError::Validation(
                "session times require --session <N>".into(),
            ));
        }

        if session_seq == Some(0) {
            return Err(AppError::Validation("session numbers are 1-based".into()));
        }

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let record = load_record(&tx, user, &date)?
            .ok_or_else(|| AppError::NotFound(format!("no day record for {} on {}", user, date)))?;

        if let Some(seq) = session_seq {
            let session = record
                .sessions
                .get(seq - 1)
                .ok_or_else(|| AppError::NotFound(format!("session #{} on {}", seq, date)))?;

            let check_in = new_in.unwrap_or(session.check_in_time);
            let check_out = new_out.or(session.check_out_time);

            update_session_times(&tx, session.id, check_in, check_out)?;
        }

        let status = new_status.unwrap_or(record.status);
        stamp_record_edit(&tx, record.id, status, admin, stamp)?;

        let updated = recompute_record(&tx, rates, record.id, late_threshold_minutes)?;

        ttlog(
            &tx,
            "edit",
            user,
            &format!("record {} edited by {} ({})", record.id, admin, date),
        )?;

        tx.commit()?;

        Ok(updated)
    }
}
