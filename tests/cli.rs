use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use taskboard::db::{FileStore, TASKS_KEY};
use taskboard::fields::{Category, Priority};
use taskboard::store::{Answer, TaskStore};
use taskboard::task::NewTask;

fn tb(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tb").expect("tb binary");
    cmd.arg("--dir").arg(dir).env_remove("TASKBOARD_DIR").env_remove("RUST_LOG");
    cmd
}

fn saved_ids(dir: &Path) -> Vec<u64> {
    let raw = fs::read_to_string(dir.join(format!("{TASKS_KEY}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn add_toggle_clear_updates_counters() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tb(dir.path())
        .args(["add", "Buy milk", "--category", "shopping", "--priority", "low"])
        .assert()
        .success()
        .stdout(contains("Added task"));

    tb(dir.path())
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total\": 1"))
        .stdout(contains("\"pending\": 1"))
        .stdout(contains("\"percent\": 0"))
        .stdout(contains("\"shopping\": 1"));

    let ids = saved_ids(dir.path());
    assert_eq!(ids.len(), 1);
    let id = ids[0].to_string();

    tb(dir.path())
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(contains(format!("Completed task {id}")));

    tb(dir.path())
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(contains("\"completed\": 1"))
        .stdout(contains("\"percent\": 100"));

    tb(dir.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted 1 task(s)"));

    tb(dir.path())
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total\": 0"));

    Ok(())
}

#[test]
fn blank_add_notifies_and_saves_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tb(dir.path())
        .args(["add", "   "])
        .assert()
        .success()
        .stderr(contains("Please enter a task!"))
        .stdout(contains("Added").not());

    assert!(!dir.path().join("tasks.json").exists());
    Ok(())
}

#[test]
fn clear_on_empty_list_notifies() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tb(dir.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stderr(contains("No tasks to clear!"));

    Ok(())
}

#[test]
fn delete_declined_on_stdin_keeps_task() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    tb(dir.path()).args(["add", "Walk dog"]).assert().success();
    let id = saved_ids(dir.path())[0].to_string();

    tb(dir.path())
        .args(["delete", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(contains("Are you sure you want to delete this task?"))
        .stdout(contains("Cancelled."));
    assert_eq!(saved_ids(dir.path()).len(), 1);

    tb(dir.path())
        .args(["delete", &id])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains(format!("Deleted task {id}")));
    assert!(saved_ids(dir.path()).is_empty());

    Ok(())
}

#[test]
fn unknown_id_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tb(dir.path())
        .args(["delete", "42", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Task 42 not found"));

    tb(dir.path())
        .args(["toggle", "42"])
        .assert()
        .failure()
        .stderr(contains("Task 42 not found"));

    Ok(())
}

#[test]
fn invalid_due_date_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tb(dir.path())
        .args(["add", "Dentist", "--due", "someday"])
        .assert()
        .failure()
        .stderr(contains("someday"));

    Ok(())
}

#[test]
fn list_filters_and_sorts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    tb(dir.path()).args(["add", "banana", "--priority", "low"]).assert().success();
    tb(dir.path()).args(["add", "Apple", "--priority", "high"]).assert().success();
    tb(dir.path()).args(["add", "cherry", "--category", "health"]).assert().success();

    let out = tb(dir.path()).args(["list", "--sort", "alphabetical"]).output()?;
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout)?;
    let apple = stdout.find("Apple").unwrap();
    let banana = stdout.find("banana").unwrap();
    let cherry = stdout.find("cherry").unwrap();
    assert!(apple < banana && banana < cherry);
    assert!(stdout.contains("3 shown of 3"));

    tb(dir.path())
        .args(["list", "--category", "health"])
        .assert()
        .success()
        .stdout(contains("cherry"))
        .stdout(contains("banana").not())
        .stdout(contains("1 shown of 3"));

    tb(dir.path())
        .args(["list", "--search", "APP"])
        .assert()
        .success()
        .stdout(contains("Apple"))
        .stdout(contains("1 shown of 3"));

    tb(dir.path())
        .args(["list", "--status", "completed"])
        .assert()
        .success()
        .stdout(contains("No tasks found"));

    Ok(())
}

#[test]
fn export_escapes_task_text() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    tb(dir.path())
        .args(["add", "<script>alert(1)</script> & more"])
        .assert()
        .success();

    let out = dir.path().join("report.html");
    tb(dir.path())
        .args(["export", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Exported 1 task(s)"));

    let page = fs::read_to_string(&out)?;
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
    assert!(!page.contains("<script>alert(1)"));
    assert!(page.contains("id=\"totalCount\">1<"));
    Ok(())
}

#[test]
fn corrupt_data_starts_empty_and_keeps_backup() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("tasks.json"), "{not json")?;

    tb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No tasks found"));

    let backup = fs::read_to_string(dir.path().join("tasks.corrupt.json"))?;
    assert_eq!(backup, "{not json");
    Ok(())
}

#[test]
fn config_defaults_apply_to_add() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("config.toml"),
        "[defaults]\ncategory = \"health\"\npriority = \"high\"\n",
    )?;

    tb(dir.path()).args(["add", "Stretch"]).assert().success();

    let store = TaskStore::open(FileStore::open(dir.path())?)?;
    let task = &store.tasks()[0];
    assert_eq!(task.category, Category::Health);
    assert_eq!(task.priority, Priority::High);
    Ok(())
}

#[test]
fn bad_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("config.toml"), "[defaults\n")?;

    tb(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Invalid configuration"));
    Ok(())
}

#[test]
fn library_writes_are_visible_to_the_cli() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    {
        let mut store = TaskStore::open(FileStore::open(dir.path())?)?;
        let input = NewTask::new("  Pay rent  ").category(Category::Personal);
        store.add(input, &mut Answer::no())?;
    }

    tb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Pay rent"))
        .stdout(contains("1 shown of 1"));
    Ok(())
}

#[test]
fn configured_date_format_is_used_by_list_and_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("config.toml"), "[display]\ndate_format = \"%d.%m.%Y\"\n")?;

    tb(dir.path())
        .args(["add", "Renew passport", "--due", "2099-03-04"])
        .assert()
        .success();

    tb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("04.03.2099"))
        .stdout(contains("2099-03-04").not());

    let out = dir.path().join("report.html");
    tb(dir.path()).args(["export", "-o"]).arg(&out).assert().success();
    assert!(fs::read_to_string(&out)?.contains("📅 04.03.2099"));
    Ok(())
}

#[test]
fn unrenderable_date_format_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("config.toml"), "[display]\ndate_format = \"%Q\"\n")?;

    tb(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Invalid date_format '%Q'"));
    Ok(())
}

#[test]
fn explicit_dir_is_not_redirected_by_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let elsewhere = TempDir::new()?;
    fs::write(
        dir.path().join("config.toml"),
        format!("data_dir = {:?}\n", elsewhere.path().display().to_string()),
    )?;

    tb(dir.path()).args(["add", "Stay here"]).assert().success();

    assert_eq!(saved_ids(dir.path()).len(), 1);
    assert!(!elsewhere.path().join("tasks.json").exists());
    Ok(())
}

#[test]
fn huge_relative_due_date_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    tb(dir.path())
        .args(["add", "Someday", "--due", "in 999999999999d"])
        .assert()
        .failure()
        .stderr(contains("Unrecognised due date"));
    Ok(())
}
