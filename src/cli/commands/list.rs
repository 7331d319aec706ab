use crate::cli::commands::resolve_user;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::list_records;
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { user, period, json } = cmd {
        let who = resolve_user(user.as_ref(), cfg);

        let pool = DbPool::new(&cfg.database)?;
        let records = list_records(&pool.conn, &who, period.as_deref())?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        if records.is_empty() {
            println!("No day records for {}.", who);
            return Ok(());
        }

        println!("📅 Day records for {}:\n", who);
        for rec in &records {
            print_record(rec);
        }
    }

    Ok(())
}

fn print_record(rec: &DayRecord) {
    let late = if rec.is_late {
        format!(" | late {} min", rec.late_minutes)
    } else {
        String::new()
    };

    println!(
        "{} [{}] {} → {} | {} h | {:.2} @ {:.2}/h{}",
        rec.date_str(),
        rec.status.to_db_str(),
        rec.check_in_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".into()),
        rec.check_out_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".into()),
        rec.total_hours,
        rec.daily_salary,
        rec.hourly_rate,
        late
    );

    for s in &rec.sessions {
        let out = s.check_out_str().unwrap_or_else(|| "open".into());
        let forced = if s.force_stopped {
            format!(
                " (force-stopped by {})",
                s.force_stopped_by.as_deref().unwrap_or("?")
            )
        } else {
            String::new()
        };
        println!(
            "    #{} {} → {} | {} h{}",
            s.seq + 1,
            s.check_in_str(),
            out,
            s.hours_worked,
            forced
        );
    }
}
