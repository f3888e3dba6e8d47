use predicates::prelude::*;
use tempfile::TempDir;
use test_env::{get_cmd, run_json, setup_test_env, setup_test_env_with_config, titles};

fn add(temp_dir: &TempDir, args: &[&str]) {
    get_cmd(temp_dir).arg("add").args(args).assert().success();
}

fn add_study_week(temp_dir: &TempDir) {
    // Q1, score 8 + 4 + 4 + 3 = 19
    add(temp_dir, &["Essay", "course=ENG", "due=+1d", "minutes=30", "priority=high", "urgency=80", "importance=80"]);
    // Q1, score 6 + 3 + 3 + 1 = 13
    add(temp_dir, &["Quiz", "prep", "course=BIO", "due=+5d", "minutes=40", "urgency=60", "importance=60"]);
    // Q2
    add(temp_dir, &["Reading", "course=HIST", "due=+14d", "minutes=20", "urgency=10", "importance=90"]);
}

#[test]
fn test_plan_stops_once_capacity_reached() {
    let temp_dir = setup_test_env();
    add_study_week(&temp_dir);
    get_cmd(&temp_dir).args(["mood", "set", "50", "50"]).assert().success();

    let plan = run_json(&temp_dir, &["plan", "--json"]);
    assert_eq!(plan["capacity_minutes"], 60);
    // 30 + 40 = 70 fits within 60 + 15, then the scan stops
    assert_eq!(titles(&plan["tasks"]), vec!["Essay", "Quiz prep"]);
    assert_eq!(plan["scheduled_minutes"], 70);
    assert_eq!(plan["date"], "2026-03-02");
}

#[test]
fn test_plan_uses_neutral_mood_without_check_in() {
    let temp_dir = setup_test_env();
    add_study_week(&temp_dir);

    let plan = run_json(&temp_dir, &["plan", "--json"]);
    assert_eq!(plan["mood"], 50);
    assert_eq!(plan["energy"], 50);
    assert_eq!(plan["capacity_minutes"], 60);
}

#[test]
fn test_plan_skips_tasks_over_the_allowance() {
    let temp_dir = setup_test_env();
    add(&temp_dir, &["Project", "course=CS", "due=+1d", "minutes=50", "urgency=90", "importance=90"]);
    add(&temp_dir, &["Worksheet", "course=MATH", "due=+2d", "minutes=40", "urgency=10", "importance=90"]);
    get_cmd(&temp_dir).args(["mood", "set", "10", "10"]).assert().success();

    let plan = run_json(&temp_dir, &["plan", "--json"]);
    assert_eq!(plan["capacity_minutes"], 30);
    // 50 > 30 + 15 is skipped; 40 <= 45 is accepted
    assert_eq!(titles(&plan["tasks"]), vec!["Worksheet"]);
}

#[test]
fn test_plan_excludes_completed_tasks() {
    let temp_dir = setup_test_env();
    add_study_week(&temp_dir);
    get_cmd(&temp_dir).args(["done", "1"]).assert().success();
    get_cmd(&temp_dir).args(["mood", "set", "50", "50"]).assert().success();

    let plan = run_json(&temp_dir, &["plan", "--json"]);
    // 40 then 60 reaches capacity
    assert_eq!(titles(&plan["tasks"]), vec!["Quiz prep", "Reading"]);
}

#[test]
fn test_plan_respects_configured_overflow() {
    let temp_dir = setup_test_env_with_config("plan.overflow=0\n");
    add_study_week(&temp_dir);
    get_cmd(&temp_dir).args(["mood", "set", "50", "50"]).assert().success();

    let plan = run_json(&temp_dir, &["plan", "--json"]);
    // Quiz would reach 70 > 60; Reading fits exactly
    assert_eq!(titles(&plan["tasks"]), vec!["Essay", "Reading"]);
    assert_eq!(plan["scheduled_minutes"], 50);
}

#[test]
fn test_plan_text_output() {
    let temp_dir = setup_test_env();
    add_study_week(&temp_dir);
    get_cmd(&temp_dir).args(["mood", "set", "50", "50"]).assert().success();

    get_cmd(&temp_dir)
        .args(["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan for 2026-03-02"))
        .stdout(predicate::str::contains("Capacity: 1h"))
        .stdout(predicate::str::contains("1. [Q1] Essay (ENG)"))
        .stdout(predicate::str::contains("2. [Q1] Quiz prep (BIO)"))
        .stdout(predicate::str::contains("Scheduled: 1h 10m of 1h"))
        .stdout(predicate::str::contains("Reading").not());
}

#[test]
fn test_plan_empty() {
    let temp_dir = setup_test_env();
    get_cmd(&temp_dir)
        .args(["plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to plan today."));
}

#[test]
fn test_plan_follows_today_override() {
    let temp_dir = setup_test_env();
    add(&temp_dir, &["Lab", "course=CHEM", "due=2026-03-10", "minutes=30", "urgency=60", "importance=60"]);

    let early = run_json(&temp_dir, &["plan", "--json"]);
    assert_eq!(early["tasks"][0]["score"], 12.0);

    let output = assert_cmd::Command::cargo_bin("studypulse")
        .unwrap()
        .env("HOME", temp_dir.path())
        .args(["--today", "2026-03-09", "plan", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let late: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(late["date"], "2026-03-09");
    assert_eq!(late["tasks"][0]["score"], 15.0);
}
