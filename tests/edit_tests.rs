//! Admin edit path: status changes, session corrections, provenance.

use chrono::{NaiveDate, NaiveTime};
use rattendance::core::calculator::LATE_THRESHOLD_MINUTES;
use rattendance::core::edit::EditLogic;
use rattendance::core::ledger::Ledger;
use rattendance::core::rates::{SqliteRates, set_hourly_rate};
use rattendance::db::initialize::init_db;
use rattendance::db::pool::DbPool;
use rattendance::errors::AppError;
use rattendance::models::status::DayStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

fn setup_pool(name: &str) -> DbPool {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance_edit.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();

    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

const THRESHOLD: i64 = LATE_THRESHOLD_MINUTES;

fn worked_day(pool: &mut DbPool, user: &str, day: NaiveDate) {
    Ledger::start(pool, &SqliteRates, user, day, t("09:00"), THRESHOLD, "ts").unwrap();
    Ledger::stop(pool, &SqliteRates, user, day, t("17:00"), THRESHOLD).unwrap();
}

#[test]
fn status_change_zeroes_totals_and_preserves_original_status() {
    let mut pool = setup_pool("status_change");
    let day = d("2025-09-01");

    set_hourly_rate(&pool.conn, "mrossi", 20.0, "ts").unwrap();
    worked_day(&mut pool, "mrossi", day);

    let rec = EditLogic::apply(
        &mut pool,
        &SqliteRates,
        "mrossi",
        day,
        Some(DayStatus::Leave),
        None,
        None,
        None,
        "admin",
        THRESHOLD,
        "2025-09-02T08:00:00+00:00",
    )
    .unwrap();

    assert_eq!(rec.status, DayStatus::Leave);
    assert_eq!(rec.original_status, DayStatus::Present);
    assert_eq!(rec.total_hours, 0.0);
    assert_eq!(rec.daily_salary, 0.0);
    assert_eq!(rec.edited_by.as_deref(), Some("admin"));
    assert_eq!(rec.edited_at.as_deref(), Some("2025-09-02T08:00:00+00:00"));
    // lateness is a present-day concept
    assert!(!rec.is_late);
    assert_eq!(rec.late_minutes, 0);
}

#[test]
fn session_time_correction_recomputes_hours() {
    let mut pool = setup_pool("time_correction");
    let day = d("2025-09-01");

    set_hourly_rate(&pool.conn, "mrossi", 10.0, "ts").unwrap();
    worked_day(&mut pool, "mrossi", day);

    let rec = EditLogic::apply(
        &mut pool,
        &SqliteRates,
        "mrossi",
        day,
        None,
        Some(1),
        Some(t("08:00")),
        Some(t("16:30")),
        "admin",
        THRESHOLD,
        "ts",
    )
    .unwrap();

    assert_eq!(rec.sessions[0].check_in_str(), "08:00");
    assert_eq!(rec.sessions[0].hours_worked, 8.5);
    assert_eq!(rec.total_hours, 8.5);
    assert_eq!(rec.daily_salary, 85.0);
    // corrected first check-in is before the threshold now
    assert!(!rec.is_late);
}

#[test]
fn edit_resnapshot_pins_the_new_rate() {
    let mut pool = setup_pool("resnapshot");
    let day = d("2025-09-01");

    set_hourly_rate(&pool.conn, "mrossi", 20.0, "ts").unwrap();
    worked_day(&mut pool, "mrossi", day);

    // a later rate change alone does not touch the stored record
    set_hourly_rate(&pool.conn, "mrossi", 30.0, "ts").unwrap();
    let untouched = rattendance::db::queries::load_record(&pool.conn, "mrossi", &day)
        .unwrap()
        .unwrap();
    assert_eq!(untouched.hourly_rate, 20.0);
    assert_eq!(untouched.daily_salary, 160.0);

    // an explicit edit recomputes and re-pins against the current rate
    let rec = EditLogic::apply(
        &mut pool,
        &SqliteRates,
        "mrossi",
        day,
        Some(DayStatus::Present),
        None,
        None,
        None,
        "admin",
        THRESHOLD,
        "ts",
    )
    .unwrap();
    assert_eq!(rec.hourly_rate, 30.0);
    assert_eq!(rec.daily_salary, 240.0);
}

#[test]
fn edit_with_nothing_to_change_is_rejected() {
    let mut pool = setup_pool("noop_edit");
    let day = d("2025-09-01");

    worked_day(&mut pool, "mrossi", day);

    let err = EditLogic::apply(
        &mut pool,
        &SqliteRates,
        "mrossi",
        day,
        None,
        None,
        None,
        None,
        "admin",
        THRESHOLD,
        "ts",
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn session_zero_is_rejected_not_aliased_to_the_first() {
    let mut pool = setup_pool("session_zero");
    let day = d("2025-09-01");

    set_hourly_rate(&pool.conn, "mrossi", 10.0, "ts").unwrap();
    worked_day(&mut pool, "mrossi", day);

    let err = EditLogic::apply(
        &mut pool,
        &SqliteRates,
        "mrossi",
        day,
        None,
        Some(0),
        Some(t("08:00")),
        None,
        "admin",
        THRESHOLD,
        "ts",
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // the first session was not touched
    let rec = rattendance::db::queries::load_record(&pool.conn, "mrossi", &day)
        .unwrap()
        .unwrap();
    assert_eq!(rec.sessions[0].check_in_str(), "09:00");
}

#[test]
fn edit_unknown_record_is_not_found() {
    let mut pool = setup_pool("edit_missing");

    let err = EditLogic::apply(
        &mut pool,
        &SqliteRates,
        "mrossi",
        d("2025-09-01"),
        Some(DayStatus::Absent),
        None,
        None,
        None,
        "admin",
        THRESHOLD,
        "ts",
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
