use crate::cli::commands::resolve_when;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::{ForceTarget, Ledger};
use crate::core::rates::SqliteRates;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::ForceStop {
        user,
        record,
        admin,
        date,
        at,
    } = cmd
    {
        let target = match (user, record) {
            (Some(u), None) => ForceTarget::User(u.as_str()),
            (None, Some(id)) => ForceTarget::Record(*id),
            _ => {
                return Err(AppError::Validation(
                    "specify exactly one of --user or --record".into(),
                ));
            }
        };

        let (d, t) = resolve_when(date.as_ref(), at.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;
        let stamp = Local::now().to_rfc3339();

        let outcome = Ledger::force_stop(
            &mut pool,
            &SqliteRates,
            target,
            admin,
            d,
            t,
            cfg.late_threshold_minutes,
            &stamp,
        )?;

        success(format!(
            "Force-stopped {} session(s) of {} on {} (by {}). Day total: {} h.",
            outcome.closed_count,
            outcome.record.user_id,
            outcome.record.date_str(),
            admin,
            outcome.record.total_hours
        ));
    }

    Ok(())
}
