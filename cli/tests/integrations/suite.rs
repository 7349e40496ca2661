use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_suite_runs_demonstration() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("suite");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("Running test suite..."))
        .stdout(predicate::str::contains("\nTest Case: 5 * 6\nBot: The result is 30.0."))
        .stdout(predicate::str::contains(
            "Test Case: 2 * 2 * 2\nBot: The result is 8.0. Suggested optimization: 2 ^ 3",
        ))
        .stdout(predicate::str::contains(
            "Bot: Inverse: [[0.5, 0.0], [0.0, 0.5]]",
        ))
        .stdout(predicate::str::ends_with("Test suite completed.\n"));
}

#[test]
fn test_cli_suite_json_lines() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("suite").arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();

    for line in text.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value["reply"]["type"].is_string());
    }
    assert!(text.lines().count() > 30);
}
