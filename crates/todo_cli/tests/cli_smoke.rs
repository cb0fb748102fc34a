use assert_cmd::Command;
use predicates::str::contains;
use std::path::Path;

fn todo(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("todo").expect("binary");
    cmd.env_remove("TODO_LOG_DIR").arg("--db").arg(db);
    cmd
}

#[test]
fn ping_reports_core_linkage() {
    Command::cargo_bin("todo")
        .expect("binary")
        .arg("ping")
        .assert()
        .success()
        .stdout(contains("todo_core ping=pong"));
}

#[test]
fn first_list_shows_seed() {
    let dir = tempfile::tempdir().unwrap();
    todo(&dir.path().join("todo.sqlite3"))
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Buy groceries"));
}

#[test]
fn add_toggle_remove_persist_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todo.sqlite3");

    todo(&db)
        .args(["add", "Walk", "dog"])
        .assert()
        .success()
        .stdout(contains("[ ]   6  Walk dog"));

    todo(&db)
        .args(["toggle", "6"])
        .assert()
        .success()
        .stdout(contains("[x]   6  Walk dog"));

    todo(&db)
        .args(["show", "6"])
        .assert()
        .success()
        .stdout(contains("route: /todos/6"));

    todo(&db).args(["remove", "6"]).assert().success();
    todo(&db)
        .args(["show", "6"])
        .assert()
        .failure()
        .stderr(contains("no task with id 6"));
}

#[test]
fn blank_title_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    todo(&dir.path().join("todo.sqlite3"))
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(contains("blank"));
}

#[test]
fn json_output_uses_storage_shape() {
    let dir = tempfile::tempdir().unwrap();
    todo(&dir.path().join("todo.sqlite3"))
        .args(["--json", "list"])
        .assert()
        .success()
        .stdout(contains("\"completed\": false"));
}

#[test]
fn reset_restores_seed() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("todo.sqlite3");

    todo(&db).args(["remove", "1"]).assert().success();
    todo(&db).arg("reset").assert().success();
    todo(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Buy groceries"));
}
