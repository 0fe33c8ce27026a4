//! CLI smoke tests

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn daybudget(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daybudget").unwrap();
    cmd.env("DAYBUDGET_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn init(dir: &Path) {
    daybudget(dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized daybudget"));
}

fn write_profile(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("profile.json");
    std::fs::write(
        &path,
        r#"{
            "monthly_income": 2000,
            "fixed_expenses": {"rent": 1100},
            "spending_frequencies": {"dining out": "10/month"}
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn commands_require_init() {
    let temp_dir = TempDir::new().unwrap();
    daybudget(temp_dir.path())
        .args(["calendar", "--month", "2025-04"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn config_shows_paths() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());
    daybudget(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:      true"))
        .stdout(predicate::str::contains("urban_high_cost"));
}

#[test]
fn plan_spend_and_redistribute() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());
    let profile = write_profile(temp_dir.path());

    daybudget(temp_dir.path())
        .arg("plan")
        .arg(&profile)
        .args(["--month", "2025-04", "--today", "2025-04-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan for 2025-04"))
        .stdout(predicate::str::contains("900.00"))
        .stdout(predicate::str::contains("Calendar for 2025-04 created."));

    daybudget(temp_dir.path())
        .args(["calendar", "--month", "2025-04", "-C", "dining out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dining Out calendar for 2025-04"))
        .stdout(predicate::str::contains("30.00"));

    daybudget(temp_dir.path())
        .args([
            "spend",
            "dining out",
            "40",
            "--date",
            "2025-04-05",
            "--today",
            "2025-04-11",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 40.00 on Dining Out"))
        .stdout(predicate::str::contains("redistributed on 2025-04-11"));

    daybudget(temp_dir.path())
        .args(["events", "--month", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redistributed"));

    daybudget(temp_dir.path())
        .args(["redistribute", "--month", "2025-04", "--today", "2025-04-12"])
        .assert()
        .success();

    // Replanning keeps recorded spend
    daybudget(temp_dir.path())
        .arg("plan")
        .arg(&profile)
        .args(["--month", "2025-04", "--today", "2025-04-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rebuilt"));

    daybudget(temp_dir.path())
        .args(["audit", "--limit", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Settings"))
        .stdout(predicate::str::contains("UPDATE Plan"))
        .stdout(predicate::str::contains("CREATE Transaction"));
}

#[test]
fn future_spend_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());

    daybudget(temp_dir.path())
        .args([
            "spend",
            "coffee",
            "4.50",
            "--date",
            "2025-04-20",
            "--today",
            "2025-04-11",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn redistribute_outside_month_fails() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());
    let profile = write_profile(temp_dir.path());

    daybudget(temp_dir.path())
        .arg("plan")
        .arg(&profile)
        .args(["--month", "2025-04", "--today", "2025-04-01"])
        .assert()
        .success();

    daybudget(temp_dir.path())
        .args(["redistribute", "--month", "2025-04", "--today", "2025-05-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the plan month"));
}

#[test]
fn history_import_and_list() {
    let temp_dir = TempDir::new().unwrap();
    init(temp_dir.path());
    let csv = temp_dir.path().join("history.csv");
    std::fs::write(
        &csv,
        "date,category,amount,memo\n2025-03-01,coffee,4.50,latte\n2025-03-02,groceries,61.20,\n",
    )
    .unwrap();

    daybudget(temp_dir.path())
        .arg("history")
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported:           2"));

    daybudget(temp_dir.path())
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("latte"));

    // Importing the same file again adds nothing
    daybudget(temp_dir.path())
        .arg("history")
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicates skipped: 2"));
}
