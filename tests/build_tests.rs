//! End-to-end build tests
//!
//! Each test lays out a small catalogue in a temporary directory and builds it.

use std::fs;
use std::path::Path;
use std::process::Command;

use prost::Message;
use regex::Regex;
use school_index::writer::{encode_index, read_index};
use school_index::{AdapterCategory, BuildConfig, BuildError, IndexBuilder, PROTOCOL_VERSION};

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const TWO_SCHOOLS: &str = r#"
schools:
  - id: "10476"
    name: Henan Normal University
    initial: H
    resource_folder: HNSF
  - id: "12949"
    name: Shanghai Zhongqiao Vocational College
    initial: S
    resource_folder: SHZQ
"#;

const ONE_ADAPTER: &str = r#"
adapters:
  - adapter_id: hnsf_01
    adapter_name: Undergraduate timetable
    category: ADAPTER_CATEGORY_UNKNOWN
    asset_js_path: HNSF/hnsf_01.js
    description: Imports the term timetable
    maintainer: someone
"#;

fn catalogue(dir: &Path) -> BuildConfig {
    let config = BuildConfig::default().with_root(dir);
    write(&config.paths.root_index, TWO_SCHOOLS);
    write(&config.adapters_path("HNSF"), ONE_ADAPTER);
    config
}

// =============================================================================
// Library pipeline
// =============================================================================

#[test]
fn test_end_to_end_skips_school_without_adapters() {
    let dir = tempfile::tempdir().unwrap();
    let config = catalogue(dir.path());
    let output = config.paths.output.clone();

    let report = IndexBuilder::new(config).run().unwrap();
    assert_eq!(report.schools, 1);
    assert_eq!(report.adapters, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, "12949");

    let index = read_index(&output).unwrap();
    assert_eq!(index.protocol_version, PROTOCOL_VERSION);
    assert_eq!(index.version_id, report.version_id);
    assert_eq!(index.schools.len(), 1);

    let school = &index.schools[0];
    assert_eq!(school.id, "10476");
    assert_eq!(school.initial, "H");
    assert_eq!(school.adapters.len(), 1);

    let adapter = &school.adapters[0];
    assert_eq!(adapter.adapter_id, "hnsf_01");
    assert_eq!(adapter.import_url, None);
    assert_eq!(adapter.category(), AdapterCategory::Unknown);
    assert_eq!(adapter.category, 0);
}

#[test]
fn test_round_trip_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = catalogue(dir.path());
    write(
        &config.adapters_path("SHZQ"),
        r#"
adapters:
  - adapter_id: shzq_01
    category: ADAPTER_CATEGORY_BACHELOR_AND_ASSOCIATE
    import_url: ""
  - adapter_id: shzq_02
    category: ADAPTER_CATEGORY_POSTGRADUATE
    import_url: "https://jw.example.edu.cn/student"
"#,
    );
    let output = config.paths.output.clone();

    IndexBuilder::new(config).run().unwrap();
    let bytes = fs::read(&output).unwrap();
    let decoded = school_index::SchoolIndex::decode(bytes.as_slice()).unwrap();

    assert_eq!(encode_index(&decoded).unwrap(), bytes);
    let urls: Vec<_> = decoded.schools[1]
        .adapters
        .iter()
        .map(|a| a.import_url.as_deref())
        .collect();
    assert_eq!(urls, vec![Some(""), Some("https://jw.example.edu.cn/student")]);
    assert_eq!(decoded.schools[1].adapters[0].category, 1);
    assert_eq!(decoded.schools[1].adapters[1].category, 2);
}

#[test]
fn test_missing_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = BuildConfig::default().with_root(dir.path());
    let output = config.paths.output.clone();

    let result = IndexBuilder::new(config).run();
    assert!(matches!(result, Err(BuildError::ManifestNotFound { .. })));
    assert!(!output.exists());
}

#[test]
fn test_failed_build_keeps_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = catalogue(dir.path());
    let output = config.paths.output.clone();

    IndexBuilder::new(config.clone()).run().unwrap();
    let previous = fs::read(&output).unwrap();

    write(&config.adapters_path("SHZQ"), "adapters: [unclosed\n");
    let result = IndexBuilder::new(config).run();
    assert!(matches!(result, Err(BuildError::Yaml { .. })));
    assert_eq!(fs::read(&output).unwrap(), previous);
}

#[test]
fn test_sequential_builds_have_increasing_version_ids() {
    let dir = tempfile::tempdir().unwrap();
    let builder = IndexBuilder::new(catalogue(dir.path()));
    let pattern = Regex::new(r"^TIME_\d{14}_\d{3}$").unwrap();

    let first = builder.run().unwrap().version_id;
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = builder.run().unwrap().version_id;

    assert!(pattern.is_match(&first), "bad token {first}");
    assert!(pattern.is_match(&second), "bad token {second}");
    assert!(first < second);
}

// =============================================================================
// Binary
// =============================================================================

fn build_index_in(dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_build-index"))
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn test_binary_succeeds_and_warns_once() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("index/root_index.yaml"), TWO_SCHOOLS);
    write(&dir.path().join("resources/HNSF/adapters.yaml"), ONE_ADAPTER);

    let output = build_index_in(dir.path());
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let warnings: Vec<_> = stdout.lines().filter(|l| l.starts_with("Warning:")).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("12949"));
    assert!(stdout.contains("File size: "));
    assert!(dir.path().join("school_index.pb").exists());
}

#[test]
fn test_binary_exits_one_without_manifest() {
    let dir = tempfile::tempdir().unwrap();

    let output = build_index_in(dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Build failed! Fatal error:"));
    assert!(stderr.contains("root_index.yaml"));
    assert!(!dir.path().join("school_index.pb").exists());
}

#[test]
fn test_binary_ignores_arguments() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("index/root_index.yaml"), TWO_SCHOOLS);
    write(&dir.path().join("resources/HNSF/adapters.yaml"), ONE_ADAPTER);

    let output = Command::new(env!("CARGO_BIN_EXE_build-index"))
        .arg("extra")
        .arg("--config")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("school_index.pb").exists());
}

#[test]
fn test_binary_ignores_environment_overrides() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("index/root_index.yaml"), TWO_SCHOOLS);
    write(&dir.path().join("resources/HNSF/adapters.yaml"), ONE_ADAPTER);

    let output = Command::new(env!("CARGO_BIN_EXE_build-index"))
        .env("SCHOOL_INDEX__PROTOCOL_VERSION", "42")
        .env("SCHOOL_INDEX__PATHS__OUTPUT", "elsewhere.pb")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(!dir.path().join("elsewhere.pb").exists());

    let index = read_index(&dir.path().join("school_index.pb")).unwrap();
    assert_eq!(index.protocol_version, PROTOCOL_VERSION);
}

#[test]
fn test_binary_builds_empty_index_from_empty_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("index/root_index.yaml"), "");

    let output = build_index_in(dir.path());
    assert_eq!(output.status.code(), Some(0));

    let index = read_index(&dir.path().join("school_index.pb")).unwrap();
    assert!(index.schools.is_empty());
    assert_eq!(index.protocol_version, PROTOCOL_VERSION);
}

#[test]
fn test_binary_reports_yaml_cause_once() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("index/root_index.yaml"), "schools: [unclosed\n");

    let output = build_index_in(dir.path());
    assert_eq!(output.status.code(), Some(1));

    let cause = serde_yaml::from_str::<serde_yaml::Value>("schools: [unclosed\n")
        .unwrap_err()
        .to_string();
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr.lines().find(|l| l.starts_with("Build failed!")).unwrap();
    assert_eq!(
        line,
        format!("Build failed! Fatal error: YAML error in index/root_index.yaml: {cause}")
    );
}
