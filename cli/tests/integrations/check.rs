use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_check_valid_expression() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("check").arg("2 + sqrt(16)");

    cmd.assert().success().stdout(predicate::str::starts_with("OK: "));
}

#[test]
fn test_cli_check_incomplete_expression() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("check").arg("5+");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete math expression"));
}

#[test]
fn test_cli_check_points_at_bad_character() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("check").arg("5 $ 3");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid character '$'"))
        .stderr(predicate::str::contains("5 $ 3"));
}

#[test]
fn test_cli_check_does_not_evaluate() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("check").arg("5 / 0");

    cmd.assert().success();
}
