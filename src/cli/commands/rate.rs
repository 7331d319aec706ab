use crate::cli::commands::resolve_user;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::rates::{RateProvider, SqliteRates, set_hourly_rate};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::user::validate_user_id;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rate { user, set } = cmd {
        let who = resolve_user(user.as_ref(), cfg);
        validate_user_id(&who)?;

        let pool = DbPool::new(&cfg.database)?;

        match set {
            Some(rate) => {
                let stamp = Local::now().to_rfc3339();
                set_hourly_rate(&pool.conn, &who, *rate, &stamp)?;
                ttlog(
                    &pool.conn,
                    "rate",
                    &who,
                    &format!("hourly rate set to {:.2}", rate),
                )?;
                success(format!("Hourly rate for {} set to {:.2}.", who, rate));
            }
            None => {
                let rate = SqliteRates.hourly_rate(&pool.conn, &who)?;
                println!("Hourly rate for {}: {:.2}", who, rate);
            }
        }
    }

    Ok(())
}
