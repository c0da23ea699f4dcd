//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn sportbook() -> Command {
    let mut cmd = Command::cargo_bin("sportbook").unwrap();
    // Keep the developer's own config and .env out of the way
    cmd.env("SPORTBOOK_CONFIG", "/nonexistent/sportbook.toml")
        .env_remove("SPORTBOOK_DB_NAME")
        .env_remove("SPORTBOOK_DB_PORT");
    cmd
}

#[test]
fn test_top_level_help() {
    sportbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("menu"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    sportbook()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_menu_help() {
    sportbook()
        .arg("menu")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive menu"));
}

#[test]
fn test_unknown_subcommand_fails() {
    sportbook()
        .arg("book-everything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_testing_mode_rejects_production_database() {
    // Defaults point at "sportbook", which lacks the test marker
    sportbook()
        .arg("--testing")
        .arg("init-db")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid database configuration"));
}

#[test]
fn test_invalid_port_override_fails() {
    sportbook()
        .env("SPORTBOOK_DB_PORT", "not-a-port")
        .arg("init-db")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for database port"));
}
