//! End-to-end tests for the spendwise binary
//!
//! Every test runs against its own temporary data directory and supplies the
//! password through the environment.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSWORD: &str = "hunter22";

fn spendwise(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendwise").unwrap();
    cmd.env("SPENDWISE_DATA_DIR", dir.path())
        .env("SPENDWISE_PASSWORD", PASSWORD)
        .env_remove("GEMINI_API_KEY");
    cmd
}

fn signed_up() -> TempDir {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["auth", "signup", "ana@example.com", "--name", "Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Ana!"));
    dir
}

#[test]
fn protected_command_requires_sign_in() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["txn", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn signup_then_whoami() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ana@example.com"))
        .stdout(predicate::str::contains("Ana"));
}

#[test]
fn logout_blocks_protected_commands() {
    let dir = signed_up();
    spendwise(&dir).args(["auth", "logout"]).assert().success();
    spendwise(&dir)
        .args(["budget", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));

    spendwise(&dir)
        .args(["auth", "login", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, Ana!"));
}

#[test]
fn add_and_list_transactions() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["txn", "add", "expense", "42.50", "-c", "Food", "-d", "Groceries", "--date", "2025-03-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created transaction:"))
        .stdout(predicate::str::contains("$42.50"));

    spendwise(&dir)
        .args(["txn", "add", "income", "1000", "--date", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income"));

    spendwise(&dir)
        .args(["txn", "list", "-m", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("2 transaction(s)"));
}

#[test]
fn rejects_invalid_amount() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["txn", "add", "expense", "abc", "-c", "Food"])
        .assert()
        .failure();
}

#[test]
fn rejects_amounts_with_unknown_prefix_or_out_of_range() {
    let dir = signed_up();
    for amount in ["abc12", "$$5", "50000000000000000.00"] {
        spendwise(&dir)
            .args(["txn", "add", "expense", amount, "-c", "Food"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid amount"));
    }

    spendwise(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn last_calendar_month_is_an_error_not_a_crash() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["txn", "list", "--month", "262142-12"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn budget_set_and_list() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["budget", "set", "Food", "200", "-m", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set budget of $200.00 for Food in March 2025"));

    spendwise(&dir)
        .args(["txn", "add", "expense", "50", "-c", "food", "--date", "2025-03-10"])
        .assert()
        .success();

    spendwise(&dir)
        .args(["budget", "list", "-m", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("$50.00"));
}

#[test]
fn export_csv_to_stdout() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["txn", "add", "expense", "12.34", "-c", "Transport", "--date", "2025-02-01"])
        .assert()
        .success();

    spendwise(&dir)
        .args(["export", "csv", "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date,Type,Category,Amount,Description"))
        .stdout(predicate::str::contains("2025-02-01,expense,Transport,12.34,"));
}

#[test]
fn export_json_to_file() {
    let dir = signed_up();
    let out = dir.path().join("backup.json");
    spendwise(&dir)
        .args(["export", "json", "-o"])
        .arg(&out)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(value["transactions"].is_array());
}

#[test]
fn ask_without_api_key_fails_cleanly() {
    let dir = signed_up();
    spendwise(&dir)
        .args(["ask", "how", "am", "I", "doing?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn config_works_signed_out() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spendwise Configuration"));
}
