use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One check-in/check-out interval within a day record.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub record_id: i64,
    pub user_id: String,
    pub date: NaiveDate, // stored as TEXT "YYYY-MM-DD"
    pub seq: i32,        // insertion order within the day
    pub check_in_time: NaiveTime, // set once, never rewritten by the user path
    pub check_out_time: Option<NaiveTime>, // set exactly once, on close
    pub is_active: bool,
    pub hours_worked: f64,   // derived, 0 until closed
    pub session_salary: f64, // derived, hours times the rate snapshot
    pub force_stopped: bool,
    pub force_stopped_by: Option<String>,
    pub force_stopped_at: Option<String>, // ISO 8601
    pub created_at: String,               // ISO 8601
}

impl Session {
    pub fn check_in_str(&self) -> String {
        self.check_in_time.format("%H:%M").to_string()
    }

    pub fn check_out_str(&self) -> Option<String> {
        self.check_out_time.map(|t| t.format("%H:%M").to_string())
    }
}
