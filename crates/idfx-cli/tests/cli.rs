use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSPORT_TEXT: &str = "\
Passport No: X1234567
Surname: Doe
Given Names: John
Nationality: Indian
Sex: M
Date of Birth: 01/01/1990
Place of Birth: Mumbai
Date of Issue: 01/01/2020
Date of Expiry: 01/01/2030
Place of Issue: Delhi
";

/// Command with its config directory pointed into `dir`.
fn idfx(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("idfx").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path()).env("HOME", dir.path());
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "passport.txt", PASSPORT_TEXT);

    idfx(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""passportNumber":{"value":"X1234567","status":"matched""#))
        .stdout(predicate::str::contains(r#""surname":{"value":"DOE""#))
        .stdout(predicate::str::contains(r#""fileNumber":{"value":null,"status":"no_match""#));
}

#[test]
fn test_extract_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "passport.txt", PASSPORT_TEXT);
    let output = dir.path().join("report.csv");

    idfx(&dir)
        .args(["extract", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("field,value,status,required,diagnostic\n"));
    assert!(csv.contains("dateOfExpiry,01/01/2030,matched,false,"));
}

#[test]
fn test_extract_strict_fails_on_missing_required() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "partial.txt", "Nationality: Indian\n");

    idfx(&dir)
        .args(["extract", "--strict"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("passportNumber, surname"));
}

#[test]
fn test_extract_without_strict_succeeds_on_missing_required() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "partial.txt", "Nationality: Indian\n");

    idfx(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing required fields"));
}

#[test]
fn test_extract_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "scan.png", "not an image");

    idfx(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_extract_with_explicit_config() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "passport.txt", "Visa No: V5566\n");
    let config = write_file(
        dir.path(),
        "config.json",
        r#"{
            "extraction": {
                "required_fields": ["visaNumber"],
                "custom_fields": [
                    {"key": "visaNumber", "patterns": ["(?i)visa no[: ]*([A-Z0-9]+)"], "kind": {"type": "code", "min_len": 4}}
                ]
            }
        }"#,
    );

    idfx(&dir)
        .arg("--config")
        .arg(&config)
        .args(["extract", "--strict"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""visaNumber":{"value":"V5566","status":"matched","required":true}"#));
}

#[test]
fn test_fields_lists_registry_in_order() {
    let dir = TempDir::new().unwrap();

    idfx(&dir)
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)passportNumber.*surname.*givenName.*fileNumber").unwrap())
        .stdout(predicate::str::contains("dateOfExpiry must not be before dateOfIssue"));
}

#[test]
fn test_batch_writes_reports_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    write_file(&inputs, "a.txt", PASSPORT_TEXT);
    write_file(&inputs, "b.txt", "Surname: Roe\n");
    write_file(&inputs, "ignored.png", "");

    idfx(&dir)
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("--output-dir")
        .arg(&outputs)
        .args(["--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(outputs.join("a.json").exists());
    assert!(outputs.join("b.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "filename,status,complete,missing_required,processing_time_ms,error");
    assert!(lines[1].starts_with("a.txt,success,true,,"));
    assert!(lines[2].starts_with("b.txt,success,false,passportNumber,"));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("idfx.json");

    idfx(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"min_text_length\": 50"));

    idfx(&dir)
        .args(["config", "get", "output.include_diagnostics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}
