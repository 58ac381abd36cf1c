use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn flatten_prints_entries_as_text() {
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten").arg(fixture_path("Web.Simple.config"));

    let output_pred = predicate::str::contains("appSettings:PreserveLoginUrl = true")
        .and(predicate::str::contains("sampleSection:setting2 = This is the setting2 value"))
        .and(predicate::str::contains("system.web").not());

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn flatten_prints_json_with_diagnostics() {
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten")
        .arg(fixture_path("Web.Full.config"))
        .arg("--format")
        .arg("json")
        .arg("--diagnostics");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["entries"]["appSettings:SomeOtherKey"], "SomeOtherValue");
    assert_eq!(
        report["entries"]["alexis:app"],
        r#"{"app":{"@endpoint":"https://test.com/"}}"#
    );
    assert!(!report["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn flatten_prints_yaml() {
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten")
        .arg(fixture_path("Web.Full.config"))
        .arg("--format")
        .arg("yaml");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("entries:").and(predicate::str::contains("diagnostics").not()));
}

#[test]
fn flatten_missing_optional_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten")
        .arg(dir.path().join("Web.config"))
        .arg("--optional");

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn flatten_missing_required_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten").arg(dir.path().join("Web.config"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:").and(predicate::str::contains("not optional")));
}

#[test]
fn flatten_skips_unknown_flat_leaf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Web.config");
    std::fs::write(
        &path,
        r#"<configuration><setting key="a" value="1"/><appSettings><add key="Mode" value="fast"/></appSettings></configuration>"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten").arg(&path).arg("--diagnostics");

    cmd.assert().success().stdout(
        predicate::str::contains("appSettings:Mode = fast")
            .and(predicate::str::contains("Element with an unsupported action")),
    );
}

#[test]
fn flatten_duplicate_leaf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Web.config");
    std::fs::write(&path, r#"<configuration><svc><item/><item/></svc></configuration>"#).unwrap();

    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("flatten").arg(&path);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("'svc:item' has already been added"));
}

#[test]
fn get_joins_key_segments() {
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("get")
        .arg(fixture_path("Web.Simple.config"))
        .arg("configNode")
        .arg("nestedNode")
        .arg("NestedKey2");

    cmd.assert().success().stdout("NestedValue2\n");
}

#[test]
fn get_missing_key_fails() {
    let mut cmd = cargo_bin_cmd!("configfile");
    cmd.arg("get")
        .arg(fixture_path("Web.Simple.config"))
        .arg("appSettings:DoesNotExist");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("appSettings:DoesNotExist"));
}
