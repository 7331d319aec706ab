//! Hourly rate provider seam.
//! The calculator never reads rates on its own: callers fetch a snapshot
//! through this trait and pass it down, which keeps the math pure and the
//! lookup replaceable in tests.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

pub trait RateProvider {
    /// Current hourly rate for a user. 0.0 when unset.
    /// Fails with Dependency when the backing store is unreachable, so the
    /// caller aborts instead of persisting totals against a guessed rate.
    fn hourly_rate(&self, conn: &Connection, user: &str) -> AppResult<f64>;
}

/// Rates read from the `rates` table of the same database.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteRates;

impl RateProvider for SqliteRates {
    fn hourly_rate(&self, conn: &Connection, user: &str) -> AppResult<f64> {
        let rate: Option<f64> = conn
            .query_row(
                "SELECT hourly_rate FROM rates WHERE user_id = ?1",
                [user],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| AppError::Dependency(format!("rate lookup failed: {}", e)))?;

        Ok(rate.unwrap_or(0.0))
    }
}

/// Fixed rate for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub f64);

impl RateProvider for FixedRate {
    fn hourly_rate(&self, _conn: &Connection, _user: &str) -> AppResult<f64> {
        Ok(self.0)
    }
}

/// Upsert a user's hourly rate.
pub fn set_hourly_rate(conn: &Connection, user: &str, rate: f64, stamp: &str) -> AppResult<()> {
    if rate < 0.0 {
        return Err(AppError::Validation(format!(
            "hourly rate must be >= 0, got {}",
            rate
        )));
    }

    conn.execute(
        "INSERT INTO rates (user_id, hourly_rate, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id) DO UPDATE SET hourly_rate = ?2, updated_at = ?3",
        rusqlite::params![user, rate, stamp],
    )?;
    Ok(())
}
