use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::core::rates::SqliteRates;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::status::DayStatus;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::parse_optional_time;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        user,
        date: date_str,
        status,
        session,
        start,
        end,
        by,
    } = cmd
    {
        let d = date::parse_date(date_str)
            .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;

        let new_status = match status {
            Some(code) => Some(DayStatus::from_code(code).ok_or_else(|| {
                AppError::InvalidStatus(format!(
                    "Invalid status '{}'. Use present, absent, leave or late.",
                    code
                ))
            })?),
            None => None,
        };

        let new_in = parse_optional_time(start.as_ref())?;
        let new_out = parse_optional_time(end.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;
        let stamp = Local::now().to_rfc3339();

        let rec = EditLogic::apply(
            &mut pool,
            &SqliteRates,
            user,
            d,
            new_status,
            *session,
            new_in,
            new_out,
            by,
            cfg.late_threshold_minutes,
            &stamp,
        )?;

        success(format!(
            "Record updated for {} on {}: status {}, {} h, salary {:.2}.",
            user,
            d,
            rec.status.to_db_str(),
            rec.total_hours,
            rec.daily_salary
        ));
    }

    Ok(())
}
