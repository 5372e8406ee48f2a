use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const LEGACY: &str = r#"{
    "routines": [
        {
            "id": 1,
            "name": "Recover",
            "kind": "Sub",
            "statements": [
                { "text": "On Error GoTo Handler", "kind": { "type": "OnErrorGoTo" } }
            ]
        },
        {
            "id": 2,
            "name": "Reset",
            "kind": "Sub",
            "statements": [
                { "trivia": { "trailing": [{ "text": "done" }] }, "kind": { "type": "Exit", "block": "Sub" } }
            ]
        }
    ]
}"#;

fn write_input(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("legacy.json");
    fs::write(&path, LEGACY).unwrap();
    path
}

#[test]
fn test_convert_fails_on_unknown_statement() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir);

    Command::cargo_bin("vb2cs-rs")
        .unwrap()
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recover"));
}

#[test]
fn test_convert_placeholder_writes_output_file() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("legacy.cs");

    Command::cargo_bin("vb2cs-rs")
        .unwrap()
        .args(["convert", "--on-error", "placeholder", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Converted code written to"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("// CONVERSION ERROR: OnErrorGoTo not implemented"));
    assert!(text.contains("// Sub Reset\n{\n    return; // done\n}\n"));
}

#[test]
fn test_convert_without_comments_to_stdout() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir);

    Command::cargo_bin("vb2cs-rs")
        .unwrap()
        .args(["convert", "--on-error", "placeholder", "--no-comments"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("    return;\n"))
        .stdout(predicate::str::contains("// done").not());
}

#[test]
fn test_inspect_lists_unrecognized_kinds() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir);

    Command::cargo_bin("vb2cs-rs")
        .unwrap()
        .arg("inspect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unrecognized\": [\n      \"OnErrorGoTo\"\n    ]"))
        .stdout(predicate::str::contains("\"Exit\": 1"));
}

#[test]
fn test_missing_input_reports_io_error() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("vb2cs-rs")
        .unwrap()
        .arg("convert")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
