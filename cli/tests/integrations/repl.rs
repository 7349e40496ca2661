use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_repl_reads_until_exit() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("repl")
        .write_stdin("x = 3\nx ^ 2\nexit\nx + 1\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bot: Variable 'x' set to 3."))
        .stdout(predicate::str::contains("Bot: The result is 9.0."))
        .stdout(predicate::str::contains("Bot: Goodbye!"))
        .stdout(predicate::str::contains("The result is 4.0.").not());
}

#[test]
fn test_cli_repl_stops_at_eof() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("repl").write_stdin("What is 2 times 3?\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bot: The result is 6.0."));
}
