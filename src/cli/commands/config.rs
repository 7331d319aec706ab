use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd {
        if *print_config {
            let path = Config::config_file();

            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("📄 {}\n", path.display());
                println!("{}", content);
            } else {
                println!("No config file found at {}; using defaults:", path.display());
                println!("  database: {}", cfg.database);
                println!("  default_user: {}", cfg.default_user);
                println!("  late_threshold_minutes: {}", cfg.late_threshold_minutes);
            }
        }
    }

    Ok(())
}
