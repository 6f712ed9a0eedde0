//! Black-box tests for the `talus` binary (§10.1, §10.5).

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn talus() -> Command {
    Command::cargo_bin("talus").unwrap()
}

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn tokenize_prints_one_token_per_line() {
    let file = fixture("pass\n");
    talus()
        .arg("tokenize")
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("Ident(\"pass\")"))
        .stdout(contains("Eof"));
}

#[test]
fn parse_prints_a_tree_dump() {
    let file = fixture("pass\n");
    talus().arg("parse").arg(file.path()).assert().success().stdout(contains("Module")).stdout(contains("Pass"));
}

#[test]
fn parse_json_emits_valid_json() {
    let file = fixture("pass\n");
    let output = talus().arg("parse").arg("--json").arg(file.path()).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("statements").is_some() || value.get("block").is_some());
}

#[test]
fn check_exits_zero_on_clean_input() {
    let file = fixture("if a:\n    pass\nelse:\n    pass\n");
    talus().arg("check").arg(file.path()).assert().success();
}

#[test]
fn check_exits_nonzero_and_reports_on_malformed_input() {
    let file = fixture("pass pass\n");
    talus().arg("check").arg(file.path()).assert().failure().stderr(contains("End of line expected"));
}

#[test]
fn check_reports_inconsistent_indentation() {
    let file = fixture("if a:\n    pass\n  pass\n");
    talus().arg("check").arg(file.path()).assert().failure().stderr(contains("Inconsistent indentation"));
}

#[test]
fn missing_file_is_an_anyhow_error_not_a_panic() {
    talus().arg("tokenize").arg("/nonexistent/path/does-not-exist.tal").assert().failure().stderr(contains("reading"));
}
