//! Smoke tests for the cocktaildb binary

use assert_cmd::Command;
use predicates::prelude::*;

fn cocktaildb() -> Command {
    let mut cmd = Command::cargo_bin("cocktaildb").unwrap();
    // Keep the user's own config and .env out of the way
    let home = tempfile::tempdir().unwrap().into_path();
    cmd.env("HOME", home)
        .env_remove("DATABASE_URL")
        .env_remove("COCKTAILDB_CONFIG")
        .env_remove("COCKTAILDB_BIND");
    cmd
}

#[test]
fn test_help_lists_commands() {
    cocktaildb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    cocktaildb()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_migrate_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("cocktails.db");

    cocktaildb()
        .arg("migrate")
        .arg("--database-url")
        .arg(format!("sqlite://{}", db_path.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Database is up to date"));

    assert!(db_path.exists());
}

#[test]
fn test_import_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("cocktails.json");
    std::fs::write(
        &json_path,
        r#"[
            {"name": "Negroni", "glass": "old-fashioned",
             "ingredients": [{"ingredient": "Gin", "amount": 3, "unit": "cl"}]},
            {"name": "Mojito", "glass": "highball"}
        ]"#,
    )
    .unwrap();

    cocktaildb()
        .arg("import")
        .arg(&json_path)
        .arg("--database-url")
        .arg(format!("sqlite://{}", dir.path().join("cocktails.db").display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 cocktails imported"));
}

#[test]
fn test_import_rejects_unknown_glass() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("cocktails.json");
    std::fs::write(&json_path, r#"[{"name": "Mai Tai", "glass": "tiki-mug"}]"#).unwrap();

    cocktaildb()
        .arg("import")
        .arg(&json_path)
        .arg("--database-url")
        .arg(format!("sqlite://{}", dir.path().join("cocktails.db").display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a JSON array of cocktails"));
}

#[test]
fn test_missing_config_file_fails() {
    cocktaildb()
        .arg("--config")
        .arg("/nonexistent/cocktaildb.toml")
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));
}
