use std::io::Write;

use tagver::config::{load_config, Config};
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(None, dir.path()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.branch, "master");
    assert_eq!(config.remote, "origin");
    assert!(!config.is_tag_driven());
}

#[test]
fn test_load_from_custom_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
versioning = "tag+make publish"
branch = "main"
remote = "upstream"

[[sources]]
path = "pkg/__init__.py"
line = 3
value = "1.2.3"

[[sources]]
path = "setup.py"
line = 12
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(temp_file.path().to_str().unwrap()), dir.path()).unwrap();
    assert!(config.is_tag_driven());
    assert_eq!(config.hook_command(), Some("make publish"));
    assert_eq!(config.branch, "main");
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.sources[1].value, None);
}

#[test]
fn test_load_from_project_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tagver.toml"),
        "versioning = \"tag\"\n",
    )
    .unwrap();

    let config = load_config(None, dir.path()).unwrap();
    assert!(config.is_tag_driven());
    assert_eq!(config.branch, "master");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"versioning = [not toml").unwrap();
    temp_file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(temp_file.path().to_str().unwrap()), dir.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_missing_custom_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some("/nonexistent/tagver.toml"), dir.path()).unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}
