use predicates::str::contains;

mod common;
use common::{init_db_with_data, init_test_db, rat, setup_test_db};

#[test]
fn test_end_to_end_late_day() {
    let db_path = setup_test_db("e2e_late_day");
    init_test_db(&db_path);

    rat()
        .args(["--db", &db_path, "rate", "--user", "mrossi", "--set", "20"])
        .assert()
        .success()
        .stdout(contains("Hourly rate for mrossi set to 20.00"));

    rat()
        .args([
            "--db", &db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "09:05",
        ])
        .assert()
        .success()
        .stdout(contains("Checked in mrossi at 09:05"))
        .stdout(contains("Late check-in: 5 minute(s)"));

    rat()
        .args([
            "--db", &db_path, "stop", "--user", "mrossi", "--date", "2025-09-01", "--at", "17:05",
        ])
        .assert()
        .success()
        .stdout(contains("8 h this session"))
        .stdout(contains("Day total: 8 h, salary 160.00 (rate 20.00)"));

    rat()
        .args(["--db", &db_path, "list", "--user", "mrossi", "--period", "2025-09"])
        .assert()
        .success()
        .stdout(contains("2025-09-01"))
        .stdout(contains("[present]"))
        .stdout(contains("late 5 min"));
}

#[test]
fn test_double_start_reports_existing_session() {
    let db_path = setup_test_db("double_start");
    init_test_db(&db_path);

    rat()
        .args([
            "--db", &db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "09:00",
        ])
        .assert()
        .success();

    rat()
        .args([
            "--db", &db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "09:30",
        ])
        .assert()
        .success()
        .stdout(contains("already checked in"))
        .stdout(contains("since 09:00"));
}

#[test]
fn test_stop_without_session_is_noop() {
    let db_path = setup_test_db("stop_noop_cli");
    init_test_db(&db_path);

    rat()
        .args([
            "--db", &db_path, "stop", "--user", "mrossi", "--date", "2025-09-01", "--at", "17:00",
        ])
        .assert()
        .success()
        .stdout(contains("nothing to do"));
}

#[test]
fn test_status_reports_provisional_hours() {
    let db_path = setup_test_db("status_provisional");
    init_test_db(&db_path);

    rat()
        .args([
            "--db", &db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "09:00",
        ])
        .assert()
        .success();

    rat()
        .args([
            "--db", &db_path, "status", "--user", "mrossi", "--date", "2025-09-01", "--at",
            "11:00", "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"hasActive\": true"))
        .stdout(contains("\"currentHours\": 2.0"))
        .stdout(contains("\"checkInTime\": \"09:00\""));
}

#[test]
fn test_status_without_session() {
    let db_path = setup_test_db("status_empty");
    init_test_db(&db_path);

    rat()
        .args([
            "--db", &db_path, "status", "--user", "mrossi", "--date", "2025-09-01", "--at",
            "11:00",
        ])
        .assert()
        .success()
        .stdout(contains("no active session"));
}

#[test]
fn test_force_stop_requires_an_open_session() {
    let db_path = setup_test_db("force_stop_cli");
    init_db_with_data(&db_path); // day 2025-09-01 is fully closed

    rat()
        .args([
            "--db", &db_path, "force-stop", "--user", "mrossi", "--admin", "boss", "--date",
            "2025-09-01", "--at", "18:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_force_stop_closes_and_stamps() {
    let db_path = setup_test_db("force_stop_ok");
    init_test_db(&db_path);

    rat()
        .args(["--db", &db_path, "rate", "--user", "mrossi", "--set", "20"])
        .assert()
        .success();

    rat()
        .args([
            "--db", &db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "09:00",
        ])
        .assert()
        .success();

    rat()
        .args([
            "--db", &db_path, "force-stop", "--user", "mrossi", "--admin", "boss", "--date",
            "2025-09-01", "--at", "17:00",
        ])
        .assert()
        .success()
        .stdout(contains("Force-stopped 1 session(s) of mrossi"));

    rat()
        .args(["--db", &db_path, "list", "--user", "mrossi", "--period", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("force-stopped by boss"));
}

#[test]
fn test_edit_changes_status() {
    let db_path = setup_test_db("edit_status_cli");
    init_db_with_data(&db_path);

    rat()
        .args([
            "--db", &db_path, "edit", "--user", "mrossi", "2025-09-01", "--status", "leave",
            "--by", "boss",
        ])
        .assert()
        .success()
        .stdout(contains("status leave"))
        .stdout(contains("0 h"));
}

#[test]
fn test_del_removes_record() {
    let db_path = setup_test_db("del_cli");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "del", "--user", "mrossi", "2025-09-01", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    rat()
        .args(["--db", &db_path, "list", "--user", "mrossi", "--period", "all"])
        .assert()
        .success()
        .stdout(contains("No day records for mrossi"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_cli");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("start (mrossi)"))
        .stdout(contains("stop (mrossi)"))
        .stdout(contains("rate (mrossi)"));
}

#[test]
fn test_db_info_counts() {
    let db_path = setup_test_db("db_info_cli");
    init_db_with_data(&db_path);

    rat()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Day records:   1"))
        .stdout(contains("Users tracked: 1"));
}

#[test]
fn test_invalid_time_is_rejected() {
    let db_path = setup_test_db("bad_time_cli");
    init_test_db(&db_path);

    rat()
        .args([
            "--db", &db_path, "start", "--user", "mrossi", "--date", "2025-09-01", "--at", "25:99",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));
}
