#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn rolodex_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("rolodex"));
    cmd.env("ROLODEX_HOME", home.as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn record_ids(home: &Path, file: &str) -> Vec<String> {
    let raw = fs::read_to_string(home.join(file)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    doc["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].to_string().trim_matches('"').to_string())
        .collect()
}

#[test]
fn test_contact_workflow() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    rolodex_cmd(home)
        .args(["contact", "add", "Alya", "790011122233", "--surname", "Nov"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact added").and(predicate::str::contains("Alya Nov")));

    rolodex_cmd(home)
        .args(["c", "add", "Julia", "380001112233", "--email", "julia@example.com"])
        .assert()
        .success();

    // Naked invocation lists contacts.
    rolodex_cmd(home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alya Nov").and(predicate::str::contains("julia@example.com")));

    rolodex_cmd(home)
        .args(["contact", "list", "--search", "JULIA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Julia").and(predicate::str::contains("Alya").not()));

    let ids = record_ids(home, "contacts.json");
    assert_eq!(ids.len(), 2);
    let alya = &ids[0][..8];

    rolodex_cmd(home)
        .args(["contact", "update", alya, "--job-title", "Engineer", "--company", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact updated"));

    rolodex_cmd(home)
        .args(["contact", "show", alya])
        .assert()
        .success()
        .stdout(predicate::str::contains("Engineer at Acme").and(predicate::str::contains("790011122233")));

    rolodex_cmd(home)
        .args(["contact", "rm", alya])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact removed"));

    assert_eq!(record_ids(home, "contacts.json").len(), 1);
}

#[test]
fn test_invalid_input_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    rolodex_cmd(home)
        .args(["contact", "add", "Alya", "+7911"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Invalid phone"));

    rolodex_cmd(home)
        .args(["contact", "add", "Alya", "790011122233", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"));

    rolodex_cmd(home)
        .args(["contact", "show", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UUID format"));

    rolodex_cmd(home)
        .args(["task", "done", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: 7"));

    assert!(!home.join("contacts.json").exists());
}

#[test]
fn test_lenient_phone_via_config() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    rolodex_cmd(home)
        .args(["config", "strict-phone", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strict-phone set to false"));

    rolodex_cmd(home)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strict-phone = false"));

    for (name, phone) in [("Alya", "+7911"), ("Julia", "+3800"), ("Ira", "Nil")] {
        rolodex_cmd(home)
            .args(["contact", "add", name, phone])
            .assert()
            .success();
    }
    assert_eq!(record_ids(home, "contacts.json").len(), 3);

    rolodex_cmd(home)
        .args(["config", "log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));
}

#[test]
fn test_groups_follow_contact_removal() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    rolodex_cmd(home)
        .args(["contact", "add", "Alya", "790011122233"])
        .assert()
        .success();
    rolodex_cmd(home)
        .args(["contact", "add", "Ira", "380001112233"])
        .assert()
        .success();
    let ids = record_ids(home, "contacts.json");

    rolodex_cmd(home)
        .args(["group", "add", "Friends", &ids[0], &ids[1][..6]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group added"));

    rolodex_cmd(home)
        .args(["g", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friends (2 members)"));

    rolodex_cmd(home)
        .args(["contact", "rm", &ids[0]])
        .assert()
        .success();

    rolodex_cmd(home)
        .args(["group", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friends (1 member)").and(predicate::str::contains("Alya").not()));
}

#[test]
fn test_task_workflow() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    rolodex_cmd(home)
        .args(["task", "add", "Notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added (1): Notes"));
    rolodex_cmd(home)
        .args(["t", "add", "Hello world", "-d", "say it"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added (2)"));

    rolodex_cmd(home)
        .args(["task", "done", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task completed (2)"));

    rolodex_cmd(home)
        .args(["task", "ls", "--pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes").and(predicate::str::contains("Hello world").not()));

    rolodex_cmd(home)
        .args(["task", "rm", "2"])
        .assert()
        .success();

    // Ids are never reused, even across runs.
    rolodex_cmd(home)
        .args(["task", "add", "Later"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added (3): Later"));

    rolodex_cmd(home)
        .args(["task", "done", "three"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a number"));
}

#[test]
fn test_reset_recovers_corrupt_snapshot() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    fs::write(home.join("tasks.json"), "{ \"records\": [").unwrap();

    rolodex_cmd(home)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Corrupt state"));

    // The contact store is independent of the broken task snapshot.
    rolodex_cmd(home)
        .args(["contact", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found."));

    rolodex_cmd(home)
        .args(["reset", "tasks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task store reset"));

    rolodex_cmd(home)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    rolodex_cmd(home)
        .args(["reset", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown store"));
}

#[test]
fn test_path_and_data_dir_flag() {
    let temp = TempDir::new().unwrap();
    let other = temp.path().join("elsewhere");

    rolodex_cmd(temp.path())
        .args(["path", "--data-dir", other.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("elsewhere")
                .and(predicate::str::contains("contacts.json"))
                .and(predicate::str::contains("tasks.json"))
                .and(predicate::str::contains("config.json")),
        );

    rolodex_cmd(temp.path())
        .args(["--data-dir", other.to_str().unwrap(), "task", "add", "Notes"])
        .assert()
        .success();
    assert!(other.join("tasks.json").exists());
    assert!(!temp.path().join("tasks.json").exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();

    rolodex_cmd(temp.path())
        .args(["-v", "task", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Opened Task store"));
}
