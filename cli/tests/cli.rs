use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn compacts_input_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, "{ \"name\" : \"Ada\",\n  \"age\": 37 }");

    cargo_bin_cmd!("ajson")
        .arg(&input)
        .assert()
        .success()
        .stdout(r#"{"name":"Ada","age":37}"#);
}

#[test]
fn reads_stdin_and_pretty_prints() {
    let expected = "{\n  \"items\": [\n    1,\n    2\n  ]\n}";

    cargo_bin_cmd!("ajson")
        .args(["--pretty", "--indent", "2"])
        .write_stdin(r#"{"items":[1,2]}"#)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn selects_value_with_pointer() {
    cargo_bin_cmd!("ajson")
        .args(["--pointer", "/servers/1/name"])
        .write_stdin(r#"{"servers":[{"name":"a"},{"name":"b"}]}"#)
        .assert()
        .success()
        .stdout(r#""b""#);
}

#[test]
fn missing_pointer_target_fails() {
    cargo_bin_cmd!("ajson")
        .args(["--pointer", "/servers/9"])
        .write_stdin(r#"{"servers":[]}"#)
        .assert()
        .failure()
        .stderr(contains("ERROR").and(contains("/servers/9")));
}

#[test]
fn set_replaces_adds_and_appends() {
    cargo_bin_cmd!("ajson")
        .args(["--set", "/name=\"Grace\""])
        .args(["--set", "/tags/-=\"new\""])
        .args(["--set", "/meta={\"ok\":true}"])
        .write_stdin(r#"{"name":"Ada","tags":["old"]}"#)
        .assert()
        .success()
        .stdout(r#"{"name":"Grace","tags":["old","new"],"meta":{"ok":true}}"#);
}

#[test]
fn set_without_equals_fails() {
    cargo_bin_cmd!("ajson")
        .args(["--set", "/name"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(contains("PATH=JSON"));
}

#[test]
fn comments_require_flag() {
    let input = "{\n  // port\n  \"port\": 8080,\n}";

    cargo_bin_cmd!("ajson")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(contains("ERROR"));

    cargo_bin_cmd!("ajson")
        .args(["--allow-comments", "--allow-trailing-commas"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(r#"{"port":8080}"#);
}

#[test]
fn empty_input_reports_error() {
    cargo_bin_cmd!("ajson")
        .write_stdin("   ")
        .assert()
        .failure()
        .stderr(contains("ERROR  the document is empty"));
}

#[test]
fn writes_to_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("out.json");
    write_file(&input, r#"[1, 2, 3]"#);

    cargo_bin_cmd!("ajson")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("✔ Wrote"));

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, "[1,2,3]");
}
