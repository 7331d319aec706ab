use super::{session::Session, status::DayStatus};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Per-user-per-date attendance aggregate.
/// Totals and mirror fields are derived from the session list and rewritten
/// by the recompute step after every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub original_status: DayStatus, // first-ever status, preserved across edits
    pub check_in_time: Option<NaiveTime>, // mirror: first session's check-in
    pub check_out_time: Option<NaiveTime>, // mirror: last session's check-out
    pub total_hours: f64,
    pub daily_salary: f64,
    pub hourly_rate: f64, // snapshot taken at last recompute, never retroactive
    pub is_late: bool,
    pub late_minutes: i64,
    pub edited_at: Option<String>, // ISO 8601
    pub edited_by: Option<String>,
    pub created_at: String, // ISO 8601
    pub sessions: Vec<Session>,
}

impl DayRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
