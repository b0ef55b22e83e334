use std::fs;

use entropy_scan::{load_analysis_config, resolve_input_path};
use tempfile::tempdir;

#[test]
fn resolve_input_path_keeps_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let abs = tmp.path().join("sample.bin");
    let resolved = resolve_input_path(abs.to_str().unwrap()).expect("resolve");
    assert_eq!(resolved, abs);
}

#[test]
fn resolve_input_path_joins_relative_paths_to_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    let resolved = resolve_input_path("nested/sample.bin").expect("resolve");
    assert_eq!(resolved, cwd.join("nested/sample.bin"));
}

#[test]
fn load_analysis_config_reads_yaml_and_json() {
    let tmp = tempdir().expect("tempdir");
    let yaml = tmp.path().join("analysis.yaml");
    fs::write(&yaml, "window_size: 512\nnormalize: false\n").unwrap();
    let cfg = load_analysis_config(&yaml).expect("yaml config");
    assert_eq!(cfg.window_size, 512);
    assert!(!cfg.normalize);
    assert!(cfg.include_regions);

    let json = tmp.path().join("analysis.json");
    fs::write(&json, r#"{"include_series": false}"#).unwrap();
    let cfg = load_analysis_config(&json).expect("json config");
    assert_eq!(cfg.window_size, 256);
    assert!(!cfg.include_series);
}

#[test]
fn load_analysis_config_rejects_unknown_extension_and_zero_window() {
    let tmp = tempdir().expect("tempdir");
    let toml = tmp.path().join("analysis.toml");
    fs::write(&toml, "window_size = 1").unwrap();
    let err = load_analysis_config(&toml).unwrap_err();
    assert!(err.to_string().contains("Unsupported config extension"), "unexpected error: {err}");

    let zero = tmp.path().join("zero.yml");
    fs::write(&zero, "window_size: 0\n").unwrap();
    let err = load_analysis_config(&zero).unwrap_err();
    assert!(err.to_string().contains("window size must be positive"), "unexpected error: {err}");
}

#[test]
fn load_analysis_config_reports_missing_file() {
    let tmp = tempdir().expect("tempdir");
    let err = load_analysis_config(&tmp.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read analysis config"));
}
