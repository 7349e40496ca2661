use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help_lists_server_command() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("server"));
}

#[test]
fn test_cli_server_help_shows_options() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("server").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_cli_server_rejects_bad_host() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("server").arg("--host").arg("not a host").arg("--port").arg("0");

    cmd.assert().failure();
}
