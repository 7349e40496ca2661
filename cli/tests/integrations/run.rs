use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_run_script() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("session.calc");

    fs::write(
        &script,
        r#"
# rate and hours
rate = 12.5
hours = 8

rate * hours
get_variables
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("run").arg(&script);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bot: Variable 'rate' set to 12.5."))
        .stdout(predicate::str::contains("Bot: The result is 100.0."))
        .stdout(predicate::str::contains("- hours: 8.0"))
        .stdout(predicate::str::contains("# rate").not());
}

#[test]
fn test_cli_run_symbolic_requests() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("symbolic.calc");

    fs::write(
        &script,
        "d/dx(sin(x))\nintegrate(cos(x), x)\ndet([[2, 0], [0, 2]])\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("run").arg(&script);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bot: Derivative: cos(x)"))
        .stdout(predicate::str::contains("Bot: Integral: sin(x)"))
        .stdout(predicate::str::contains("Bot: Determinant: 4.0"));
}

#[test]
fn test_cli_run_missing_file() {
    let mut cmd = Command::cargo_bin("calcbot").unwrap();
    cmd.arg("run").arg("/nonexistent/session.calc");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}
