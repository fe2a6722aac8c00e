//! Integration tests for the match pipeline.

use std::fs;
use std::path::Path;

use catmatch_cli::config::{AppConfig, ConfigOverrides, DEFAULT_CONFIG_FILE};
use catmatch_cli::pipeline::run_match;
use tempfile::tempdir;

const HARDWARE_INPUT: &str = "4\nгвоздь\nшуруп\nкраска синяя\nведро для воды\n\
                              3\nкраска\nкорыто для воды\nшуруп 3х1.5\n";

fn config_for(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.apply(&ConfigOverrides {
        input: Some(dir.join("input.txt")),
        output: Some(dir.join("output.txt")),
        ..ConfigOverrides::default()
    });
    config
}

#[test]
fn match_writes_key_value_lines() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("input.txt"), HARDWARE_INPUT).unwrap();

    let run = run_match(&config_for(dir.path()), false).unwrap();

    assert_eq!(run.source_count, 4);
    assert_eq!(run.target_count, 3);
    assert_eq!(run.output.as_deref(), Some(dir.path().join("output.txt").as_path()));
    let written = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    insta::assert_snapshot!(written, @r"
    гвоздь:?
    шуруп:шуруп 3х1.5
    краска синяя:краска
    ведро для воды:корыто для воды
    ");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("input.txt"), "1\na\n1\nb\n").unwrap();

    let run = run_match(&config_for(dir.path()), true).unwrap();

    assert!(run.output.is_none());
    assert!(!dir.path().join("output.txt").exists());
    assert_eq!(run.matching.get("a"), Some("b"));
}

#[test]
fn placeholder_and_json_report_from_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("input.txt"),
        "1\nБетон с присадкой\n2\nприсадка для бетона\nдоставка\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        r#"
[files]
json_report = "report.json"

[matching]
placeholder = "N/A"
"#,
    )
    .unwrap();

    let mut config = AppConfig::discover(None, dir.path()).unwrap();
    assert_eq!(config.matching.placeholder, "N/A");
    assert_eq!(
        config.files.json_report.as_deref(),
        Some(Path::new("report.json"))
    );
    config.apply(&ConfigOverrides {
        input: Some(dir.path().join("input.txt")),
        output: Some(dir.path().join("output.txt")),
        json_report: Some(dir.path().join("report.json")),
        ..ConfigOverrides::default()
    });
    let run = run_match(&config, false).unwrap();

    let written = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(
        written,
        "Бетон с присадкой:присадка для бетона\nдоставка:N/A\n"
    );
    assert!(run.json_report.is_some());
    assert!(dir.path().join("report.json").exists());
}

#[test]
fn malformed_input_names_side_and_line() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("input.txt"), "1\na\nmany\n").unwrap();

    let err = run_match(&config_for(dir.path()), false).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("invalid target count 'many' at line 3"), "{message}");
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();

    let err = run_match(&config_for(dir.path()), false).unwrap_err();

    assert!(format!("{err:#}").contains("failed to open input file"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(AppConfig::discover(Some(&missing), dir.path()).is_err());
    assert_eq!(
        AppConfig::discover(None, dir.path()).unwrap(),
        AppConfig::default()
    );
}

#[test]
fn invalid_config_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[matching]\nmin_similarity = \"high\"\n").unwrap();

    let err = AppConfig::load(&path).unwrap_err();

    assert!(err.to_string().starts_with("failed to parse config file"));
}
