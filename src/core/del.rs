use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::delete_record;
use crate::errors::{AppError, AppResult};
use crate::utils::user::validate_user_id;
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Admin-only: day records are never deleted automatically.
    pub fn apply(pool: &mut DbPool, user: &str, date: NaiveDate) -> AppResult<()> {
        validate_user_id(user)?;

        let deleted = delete_record(&pool.conn, user, &date)?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "no day record for {} on {}",
                user, date
            )));
        }

        ttlog(
            &pool.conn,
            "del",
            user,
            &format!("day record deleted for {}", date),
        )?;

        Ok(())
    }
}
