use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_eval_expression() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("eval").arg("(5 + 3) * 4");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bot: The result is 32.0."));
}

#[test]
fn test_cli_eval_lines_share_variables() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("eval").arg("x = 10").arg("x + 7");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bot: Variable 'x' set to 10."))
        .stdout(predicate::str::contains("Bot: The result is 17.0."));
}

#[test]
fn test_cli_eval_error_reply_still_succeeds() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("eval").arg("5 / 0");

    cmd.assert().success().stdout(predicate::str::contains(
        "Bot: Error - Division by zero is not allowed.",
    ));
}

#[test]
fn test_cli_eval_json_output() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("eval").arg("--json").arg("5 + 5 + 5");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8(output).unwrap().trim()).unwrap();

    assert_eq!(value["input"], "5 + 5 + 5");
    assert_eq!(value["reply"]["type"], "evaluated");
    assert_eq!(value["reply"]["suggestion"], "5 * 3");
}

#[test]
fn test_cli_eval_requires_input() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("eval");

    cmd.assert().failure();
}

#[test]
fn test_cli_eval_with_config_limits() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("calcbot.json");
    std::fs::write(&config, r#"{"limits": {"max_input_bytes": 4}}"#).unwrap();

    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("--config").arg(&config).arg("eval").arg("1 + 2 + 3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resource limit exceeded: max_input_bytes"));
}

#[test]
fn test_cli_eval_with_unreadable_config() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("--config")
        .arg("/nonexistent/calcbot.json")
        .arg("eval")
        .arg("1 + 1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
