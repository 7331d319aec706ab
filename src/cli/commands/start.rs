use crate::cli::commands::{resolve_user, resolve_when};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::core::rates::SqliteRates;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { user, date, at } = cmd {
        let who = resolve_user(user.as_ref(), cfg);
        let (d, t) = resolve_when(date.as_ref(), at.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;
        let stamp = Local::now().to_rfc3339();

        let outcome = Ledger::start(
            &mut pool,
            &SqliteRates,
            &who,
            d,
            t,
            cfg.late_threshold_minutes,
            &stamp,
        )?;

        if outcome.already_active {
            info(format!(
                "{} is already checked in on {} (since {}).",
                who,
                d,
                outcome.session.check_in_str()
            ));
        } else {
            success(format!(
                "Checked in {} at {} on {}.",
                who,
                outcome.session.check_in_str(),
                d
            ));
            if outcome.record.is_late {
                info(format!(
                    "Late check-in: {} minute(s) past threshold.",
                    outcome.record.late_minutes
                ));
            }
        }
    }

    Ok(())
}
