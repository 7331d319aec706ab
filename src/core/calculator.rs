//! Pure salary and lateness calculators.
//! Deterministic, storage-free, shared by every stop path (user stop,
//! admin edit, force-stop). No formula lives anywhere else.

use crate::models::status::DayStatus;
use crate::utils::time::minutes_of_day;
use chrono::NaiveTime;

/// Default lateness threshold: 09:00 as minutes since midnight.
pub const LATE_THRESHOLD_MINUTES: i64 = 540;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Round to 4 decimal places. Applied at every computation point so
/// floating-point drift cannot accumulate across sessions.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Wall-clock hours between two times of day.
/// An end smaller than the start means the session crossed midnight: the
/// elapsed minutes get a full day added before converting to hours.
/// Returns 0.0 when either side is absent (open or malformed session).
pub fn hours_between(start: Option<NaiveTime>, end: Option<NaiveTime>) -> f64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };

    let mut delta = minutes_of_day(end) - minutes_of_day(start);
    if delta < 0 {
        delta += MINUTES_PER_DAY;
    }

    round4(delta as f64 / 60.0)
}

/// Salary for a span of hours at a given rate, gated by day status:
/// only worked statuses (present, late) earn anything.
pub fn salary_for(hours: f64, rate: f64, status: DayStatus) -> f64 {
    if !status.is_payable() || rate <= 0.0 {
        return 0.0;
    }
    round4(hours * rate)
}

/// Lateness of the first check-in of the day against the threshold.
/// Only meaningful for a present day; other statuses are never late.
pub fn lateness_for(
    check_in: Option<NaiveTime>,
    status: DayStatus,
    threshold_minutes: i64,
) -> (bool, i64) {
    if status != DayStatus::Present {
        return (false, 0);
    }

    let Some(check_in) = check_in else {
        return (false, 0);
    };

    let minutes = minutes_of_day(check_in);
    if minutes > threshold_minutes {
        (true, minutes - threshold_minutes)
    } else {
        (false, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_time;

    fn t(s: &str) -> Option<NaiveTime> {
        parse_time(s)
    }

    #[test]
    fn hours_between_regular_day() {
        assert_eq!(hours_between(t("09:00"), t("17:00")), 8.0);
        assert_eq!(hours_between(t("09:05"), t("17:05")), 8.0);
        assert_eq!(hours_between(t("09:00"), t("09:00")), 0.0);
    }

    #[test]
    fn hours_between_crosses_midnight() {
        assert_eq!(hours_between(t("22:00"), t("02:00")), 4.0);
        assert_eq!(hours_between(t("23:30"), t("00:30")), 1.0);
    }

    #[test]
    fn hours_between_rounds_to_four_decimals() {
        // 10 minutes = 0.166666... hours
        assert_eq!(hours_between(t("09:00"), t("09:10")), 0.1667);
    }

    #[test]
    fn hours_between_absent_side_is_zero() {
        assert_eq!(hours_between(None, t("17:00")), 0.0);
        assert_eq!(hours_between(t("09:00"), None), 0.0);
    }

    #[test]
    fn salary_gated_by_status() {
        assert_eq!(salary_for(8.0, 15.0, DayStatus::Present), 120.0);
        assert_eq!(salary_for(8.0, 15.0, DayStatus::Late), 120.0);
        assert_eq!(salary_for(8.0, 15.0, DayStatus::Absent), 0.0);
        assert_eq!(salary_for(8.0, 15.0, DayStatus::Leave), 0.0);
    }

    #[test]
    fn salary_zero_for_unset_rate() {
        assert_eq!(salary_for(8.0, 0.0, DayStatus::Present), 0.0);
        assert_eq!(salary_for(8.0, -3.0, DayStatus::Present), 0.0);
    }

    #[test]
    fn lateness_threshold() {
        assert_eq!(
            lateness_for(t("09:15"), DayStatus::Present, LATE_THRESHOLD_MINUTES),
            (true, 15)
        );
        assert_eq!(
            lateness_for(t("08:59"), DayStatus::Present, LATE_THRESHOLD_MINUTES),
            (false, 0)
        );
        // 09:00 sharp is on time
        assert_eq!(
            lateness_for(t("09:00"), DayStatus::Present, LATE_THRESHOLD_MINUTES),
            (false, 0)
        );
    }

    #[test]
    fn lateness_only_for_present() {
        assert_eq!(
            lateness_for(t("10:00"), DayStatus::Leave, LATE_THRESHOLD_MINUTES),
            (false, 0)
        );
        assert_eq!(
            lateness_for(None, DayStatus::Present, LATE_THRESHOLD_MINUTES),
            (false, 0)
        );
    }
}
