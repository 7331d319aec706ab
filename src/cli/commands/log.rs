use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;

        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let op_target = if target.is_empty() {
                operation
            } else {
                format!("{} ({})", operation, target)
            };
            println!("{:>4}: {} | {} => {}", id, date, op_target, message);
        }
    }

    Ok(())
}
