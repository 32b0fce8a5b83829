use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_find_prints_project_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("garden.yml"), "kind: Project\nname: demo\n")
        .expect("Failed to write garden.yml");
    let nested = dir.path().join("services/api");
    fs::create_dir_all(&nested).expect("Failed to create dirs");

    Command::cargo_bin("garden-config")
        .expect("Binary should build")
        .arg("find")
        .arg(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"demo\""))
        .stdout(predicate::str::contains("\"apiVersion\": \"garden.io/v0\""));
}

#[test]
fn test_load_prints_resources() {
    let dir = tempdir().expect("Failed to create temp dir");
    let content = "kind: Module\nname: api\ntype: exec\nbuild:\n  dependencies: [base]\n";
    fs::write(dir.path().join("garden.yml"), content).expect("Failed to write garden.yml");

    Command::cargo_bin("garden-config")
        .expect("Binary should build")
        .arg("load")
        .arg(dir.path())
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"Module\""))
        .stdout(predicate::str::contains("\"name\": \"base\""));
}

#[test]
fn test_load_reports_unknown_kind() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("garden.yml"), "kind: Widget\n").expect("Failed to write garden.yml");

    Command::cargo_bin("garden-config")
        .expect("Binary should build")
        .arg("load")
        .arg(dir.path())
        .arg("--project-root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config kind Widget"));
}

#[test]
fn test_settings_override_default_api_version() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("garden.yml"), "kind: Project\nname: demo\n")
        .expect("Failed to write garden.yml");
    let settings = dir.path().join("loader.toml");
    fs::write(&settings, "default-api-version = \"garden.io/v1\"\n").expect("Failed to write settings");

    Command::cargo_bin("garden-config")
        .expect("Binary should build")
        .arg("--settings")
        .arg(&settings)
        .arg("find")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"apiVersion\": \"garden.io/v1\""));
}
