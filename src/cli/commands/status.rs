use crate::cli::commands::{resolve_user, resolve_when};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status {
        user,
        date,
        at,
        json,
    } = cmd
    {
        let who = resolve_user(user.as_ref(), cfg);
        let (d, t) = resolve_when(date.as_ref(), at.as_ref())?;

        let mut pool = DbPool::new(&cfg.database)?;

        let status = Ledger::active_status(&mut pool, &who, d, t)?;

        if *json {
            let payload = serde_json::json!({
                "user": who,
                "date": d.format("%Y-%m-%d").to_string(),
                "hasActive": status.has_active,
                "currentHours": status.current_hours,
                "checkInTime": status.session.as_ref().map(|s| s.check_in_str()),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else if status.has_active {
            println!(
                "🟢 {} is checked in on {} since {} ({} h so far)",
                who,
                d,
                status
                    .session
                    .as_ref()
                    .map(|s| s.check_in_str())
                    .unwrap_or_default(),
                status.current_hours.unwrap_or(0.0)
            );
        } else {
            println!("⚪ {} has no active session on {}", who, d);
        }
    }

    Ok(())
}
