//! Injectable time source.
//! Every elapsed-time and lateness computation takes its "now" from here
//! instead of calling chrono ad hoc, so tests can pin the clock.

use chrono::{Local, NaiveDate, NaiveTime};

pub trait Clock {
    fn now_date(&self) -> NaiveDate;
    fn now_time(&self) -> NaiveTime;

    /// ISO 8601 timestamp for audit fields.
    fn now_stamp(&self) -> String {
        Local::now().to_rfc3339()
    }
}

/// Wall clock (local timezone).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_time(&self) -> NaiveTime {
        // truncate to the minute, the resolution we persist
        let t = Local::now().time();
        NaiveTime::from_hms_opt(chrono::Timelike::hour(&t), chrono::Timelike::minute(&t), 0)
            .unwrap_or(t)
    }
}

/// Pinned clock for tests and for CLI --date/--at overrides.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl FixedClock {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

impl Clock for FixedClock {
    fn now_date(&self) -> NaiveDate {
        self.date
    }

    fn now_time(&self) -> NaiveTime {
        self.time
    }
}
