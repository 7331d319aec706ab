use crate::cli::commands::{resolve_user, resolve_when};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::core::rates::SqliteRates;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop { user, date, at } = cmd {
        let who = resolve_user(user.as_ref(), cfg);
        let (d, t) = resolve_when(date.as_ref(), at.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;

        let outcome = Ledger::stop(
            &mut pool,
            &SqliteRates,
            &who,
            d,
            t,
            cfg.late_threshold_minutes,
        )?;

        match (outcome.session, outcome.record) {
            (Some(s), Some(rec)) => {
                success(format!(
                    "Checked out {} at {} on {} ({} h this session).",
                    who,
                    s.check_out_str().unwrap_or_default(),
                    d,
                    s.hours_worked
                ));
                info(format!(
                    "Day total: {} h, salary {:.2} (rate {:.2}).",
                    rec.total_hours, rec.daily_salary, rec.hourly_rate
                ));
            }
            _ => {
                info(format!("No active session for {} on {}; nothing to do.", who, d));
            }
        }
    }

    Ok(())
}
