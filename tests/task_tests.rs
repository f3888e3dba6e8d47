use predicates::prelude::*;
use test_env::{get_cmd, rewrite_config, run_json, setup_test_env, setup_test_env_with_config, titles};

fn add_lab_report(temp_dir: &tempfile::TempDir) {
    get_cmd(temp_dir)
        .args([
            "add", "Lab", "report", "course=CHEM", "due=+1d", "minutes=45",
            "priority=high", "urgency=80", "importance=90",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task 1: Lab report"));
}

#[test]
fn test_add_and_list() {
    let temp_dir = setup_test_env();
    add_lab_report(&temp_dir);

    get_cmd(&temp_dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab report"))
        .stdout(predicate::str::contains("CHEM"))
        .stdout(predicate::str::contains("tomorrow"))
        .stdout(predicate::str::contains("45m"))
        .stdout(predicate::str::contains("19.5"));
}

#[test]
fn test_list_json_fields() {
    let temp_dir = setup_test_env();
    add_lab_report(&temp_dir);

    let tasks = run_json(&temp_dir, &["list", "--json"]);
    let task = &tasks[0];
    assert_eq!(task["id"], 1);
    assert_eq!(task["course"], "CHEM");
    assert_eq!(task["due_date"], "2026-03-03");
    assert_eq!(task["minutes"], 45);
    assert_eq!(task["priority"], "high");
    assert_eq!(task["type"], "homework");
    assert_eq!(task["quadrant"], "Q1");
    // 4*2 + 80/20 + 90/20 + 3
    assert_eq!(task["score"], 19.5);
    assert_eq!(task["completed"], false);
}

#[test]
fn test_add_uses_form_defaults() {
    let temp_dir = setup_test_env();
    get_cmd(&temp_dir)
        .args(["add", "Read", "chapter", "2", "course=HIST", "due=2026-03-20"])
        .assert()
        .success();

    let tasks = run_json(&temp_dir, &["list", "--json"]);
    let task = &tasks[0];
    assert_eq!(task["title"], "Read chapter 2");
    assert_eq!(task["minutes"], 60);
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["urgency"], 50);
    assert_eq!(task["importance"], 50);
    assert_eq!(task["score"], 11.0);
}

#[test]
fn test_add_requires_course_and_due() {
    let temp_dir = setup_test_env();
    get_cmd(&temp_dir)
        .args(["add", "Essay", "due=tomorrow"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Course is required"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Due date is required"));

    get_cmd(&temp_dir)
        .args(["add", "course=ENG", "due=tomorrow"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task title is required"));
}

#[test]
fn test_add_rejects_bad_values() {
    let temp_dir = setup_test_env();
    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=tomorrow", "urgency=150"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("urgency must be between 0 and 100"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=tomorrow", "minutes=0"])
        .assert()
        .failure()
        .code(1);

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=tomorrow", "minutes=4294967295"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("minutes must be at most 1440"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=tomorrow", "minutes=99999999h"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("too large"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=+999999999d"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid date offset"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=someday"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported date expression"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=tomorrow", "priority=urgent"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Valid priorities"));

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=   ", "due=tomorrow"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Field 'course' needs a value"));
}

#[test]
fn test_add_suggests_field_name() {
    let temp_dir = setup_test_env();
    get_cmd(&temp_dir)
        .args(["add", "Essay", "corse=ENG", "due=tomorrow"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean 'course'?"));
}

#[test]
fn test_done_toggles_completion() {
    let temp_dir = setup_test_env();
    add_lab_report(&temp_dir);

    get_cmd(&temp_dir)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task 1: Lab report"));

    get_cmd(&temp_dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    let all = run_json(&temp_dir, &["list", "--all", "--json"]);
    assert_eq!(all[0]["completed"], true);

    get_cmd(&temp_dir)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened task 1"));
    assert_eq!(titles(&run_json(&temp_dir, &["list", "--json"])), vec!["Lab report"]);
}

#[test]
fn test_delete_task() {
    let temp_dir = setup_test_env();
    add_lab_report(&temp_dir);

    get_cmd(&temp_dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task 1"));

    get_cmd(&temp_dir)
        .args(["show", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task 1 not found"));

    get_cmd(&temp_dir)
        .args(["delete", "1"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_show_score_breakdown() {
    let temp_dir = setup_test_env();
    add_lab_report(&temp_dir);

    get_cmd(&temp_dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1: Lab report"))
        .stdout(predicate::str::contains("Q1 Do First"))
        .stdout(predicate::str::contains("Priority:    High"))
        .stdout(predicate::str::contains("Deadline:      3.0"))
        .stdout(predicate::str::contains("Total:        19.5"));
}

#[test]
fn test_decimal_scale_ratings() {
    let temp_dir = setup_test_env_with_config("rating.scale=decimal\n");
    get_cmd(&temp_dir)
        .args(["add", "Flashcards", "course=SPAN", "due=+10d", "urgency=7", "importance=6"])
        .assert()
        .success();

    let tasks = run_json(&temp_dir, &["list", "--json"]);
    // Urgent at the inclusive threshold of 7, importance below it
    assert_eq!(tasks[0]["quadrant"], "Q3");
    // 3*2 + 7/2 + 6/2 + 0
    assert_eq!(tasks[0]["score"], 12.5);

    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=SPAN", "due=+1d", "urgency=11"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 0 and 10"));
}

#[test]
fn test_ratings_survive_scale_change() {
    let temp_dir = setup_test_env();
    get_cmd(&temp_dir)
        .args(["add", "Essay", "course=ENG", "due=+10d", "urgency=80", "importance=60"])
        .assert()
        .success();
    get_cmd(&temp_dir).args(["mood", "set", "90", "70"]).assert().success();

    rewrite_config(&temp_dir, "rating.scale=decimal\n");
    let tasks = run_json(&temp_dir, &["list", "--json"]);
    assert_eq!(tasks[0]["urgency"], 8);
    assert_eq!(tasks[0]["importance"], 6);
    // 6 is below the decimal threshold of 7
    assert_eq!(tasks[0]["quadrant"], "Q3");

    let mood = run_json(&temp_dir, &["mood", "show", "--json"]);
    assert_eq!(mood["mood"], 9);
    assert_eq!(mood["energy"], 7);
    assert_eq!(mood["capacity_minutes"], 120);

    get_cmd(&temp_dir)
        .args(["add", "Lab", "course=CHEM", "due=+10d", "urgency=9", "importance=3"])
        .assert()
        .success();
    rewrite_config(&temp_dir, "");
    let tasks = run_json(&temp_dir, &["list", "--json"]);
    assert_eq!(tasks[0]["urgency"], 80);
    assert_eq!(tasks[1]["urgency"], 90);
    assert_eq!(tasks[1]["importance"], 30);
}
