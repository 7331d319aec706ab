pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod force_stop;
pub mod init;
pub mod list;
pub mod log;
pub mod rate;
pub mod start;
pub mod status;
pub mod stop;

use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::errors::{AppError, AppResult};
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};

/// Resolve the effective (date, time) for an operation: CLI overrides win,
/// otherwise the system clock. Tests pin both flags.
pub fn resolve_when(
    date_arg: Option<&String>,
    at_arg: Option<&String>,
) -> AppResult<(NaiveDate, NaiveTime)> {
    let clock = SystemClock;

    let d = match date_arg {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => clock.now_date(),
    };
    let t = match at_arg {
        Some(s) => time::parse_time(s).ok_or_else(|| AppError::InvalidTime(s.clone()))?,
        None => clock.now_time(),
    };

    // overrides flow through the same Clock seam the library uses
    let pinned = FixedClock::new(d, t);
    Ok((pinned.now_date(), pinned.now_time()))
}

/// Effective user id: explicit flag or the configured default.
pub fn resolve_user(user_arg: Option<&String>, cfg: &Config) -> String {
    user_arg.cloned().unwrap_or_else(|| cfg.default_user.clone())
}
