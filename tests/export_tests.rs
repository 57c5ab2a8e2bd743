use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{init_db_with_location, rhc, setup_test_db, temp_out};

#[test]
fn test_export_timesheet_csv() {
    let db_path = setup_test_db("export_timesheet_csv");
    let out = temp_out("export_timesheet_csv", "csv");
    init_db_with_location(&db_path, "Lobby");

    rhc()
        .args(["--db", &db_path, "count", "1", "--in", "2", "--out", "1"])
        .assert()
        .success();

    rhc()
        .args([
            "--db", &db_path, "export", "1", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("location_id,location_name,start_time,end_time,in_count,out_count,total_count")
    );
    let row = lines.next().expect("one data row");
    assert!(row.starts_with("1,Lobby,"));
    assert!(row.ends_with(",,2,1,1"), "open interval has empty end_time: {row}");
    assert!(lines.next().is_none());
}

#[test]
fn test_export_timesheet_json() {
    let db_path = setup_test_db("export_timesheet_json");
    let out = temp_out("export_timesheet_json", "json");
    init_db_with_location(&db_path, "Lobby");

    rhc()
        .args(["--db", &db_path, "count", "1", "--in", "4"])
        .assert()
        .success();

    rhc()
        .args([
            "--db", &db_path, "export", "1", "--format", "json", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["location_name"], "Lobby");
    assert_eq!(rows[0]["in_count"], 4);
    assert_eq!(rows[0]["total_count"], 4);
}

#[test]
fn test_export_without_intervals_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db_with_location(&db_path, "Lobby");

    rhc()
        .args(["--db", &db_path, "export", "1", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("No intervals recorded"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_db");
    init_db_with_location(&db_path, "Lobby");

    let plain = temp_out("backup_plain", "sqlite");
    rhc()
        .args(["--db", &db_path, "backup", "--file", &plain, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let packed = temp_out("backup_packed", "sqlite");
    let zip = temp_out("backup_packed", "zip");
    rhc()
        .args(["--db", &db_path, "backup", "--file", &packed, "--compress", "--force"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&zip).exists());
    assert!(!Path::new(&packed).exists());
}

#[test]
fn test_compressed_backup_keeps_existing_plain_file_unless_confirmed() {
    let db_path = setup_test_db("backup_keep_plain");
    init_db_with_location(&db_path, "Lobby");

    let plain = temp_out("backup_keep_plain", "sqlite");
    let zip = temp_out("backup_keep_plain", "zip");
    fs::write(&plain, "keep me").expect("write existing file");

    rhc()
        .args(["--db", &db_path, "backup", "--file", &plain, "--compress"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("existing file not overwritten"));

    assert_eq!(fs::read_to_string(&plain).expect("read plain"), "keep me");
    assert!(!Path::new(&zip).exists());
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info_check");
    init_db_with_location(&db_path, "Lobby");

    rhc()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Locations:"))
        .stdout(contains("Integrity check passed"));
}
