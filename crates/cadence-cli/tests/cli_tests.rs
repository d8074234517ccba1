use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn cadence_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_board_without_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active plan"));
}

#[test]
fn test_cli_create_template() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "template",
            "create",
            "Morning stretch",
            "--description",
            "Ten minutes before breakfast",
            "--points",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created template with ID: 1"));
}

#[test]
fn test_cli_list_templates() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "template",
            "create",
            "Morning stretch",
            "--description",
            "Ten minutes",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Templates"))
        .stdout(predicate::str::contains("Morning stretch"));
}

#[test]
fn test_cli_archived_template_leaves_listing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "template",
            "create",
            "Morning stretch",
            "--description",
            "Ten minutes",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "template", "archive", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived template 1"));

    cadence_cmd()
        .args(["--database-file", db_arg, "template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates yet."));

    cadence_cmd()
        .args(["--database-file", db_arg, "template", "list", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(archived)"));
}

#[test]
fn test_cli_plan_create_shows_board() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "template",
            "create",
            "Morning stretch",
            "--description",
            "Ten minutes",
            "--points",
            "3",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "--template",
            "1:daily:2",
            "--description",
            "Focus week",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan 1 for week"))
        .stdout(predicate::str::contains("Focus week"))
        .stdout(predicate::str::contains("## Todo (2)"));
}

#[test]
fn test_cli_duplicate_plan_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "template",
            "create",
            "Morning stretch",
            "--description",
            "Ten minutes",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "--template",
            "1:daily:1",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "--template",
            "1:daily:1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("active plan already exists"));
}

#[test]
fn test_cli_task_status_update() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "adhoc",
            "create",
            "Call the bank",
            "--points",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created ad-hoc task with ID: 1"))
        .stdout(predicate::str::contains("unattached"));

    cadence_cmd()
        .args(["--database-file", db_arg, "task", "set", "1", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 is now"))
        .stdout(predicate::str::contains("Done"));
}

#[test]
fn test_cli_adhoc_pool_listing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "adhoc", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No unattached ad-hoc tasks."));

    cadence_cmd()
        .args(["--database-file", db_arg, "adhoc", "create", "Call the bank"])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "adhoc", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Call the bank"));
}

#[test]
fn test_cli_rejects_malformed_template_selection() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "--template",
            "1:monthly:2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid kind"));
}

#[test]
fn test_cli_plan_create_requires_a_selection() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one template"));
}

#[test]
fn test_cli_help_output() {
    cadence_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly task-planning board"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("template"));
}

#[test]
fn test_cli_version_output() {
    cadence_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cadence"));
}
