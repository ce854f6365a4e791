//! Unit tests for config module

use harvest::{Config, ParamsFormat};
use tempfile::TempDir;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert!(config.forum.search_all);
    assert_eq!(config.forum.time_filter, "all");
    assert_eq!(config.forum.sort_by, "relevance");
    assert_eq!(config.forum.minimum_posts, 10_000);
    assert!(config.forum.subreddits.contains(&"GrainGrowers".to_string()));
    assert_eq!(config.feed.language, "en");
    assert_eq!(config.feed.baseline_date, "2023-01-01");
    assert!(!config.feed.search_all_time);
    assert_eq!(config.feed.minimum_results, 9);
    assert_eq!(config.decoder.poll_interval_secs, 3);
    assert_eq!(config.decoder.completion_threshold, 5);
    assert_eq!(config.output.format, ParamsFormat::Python);
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn partial_sections_fill_in_defaults() {
    let toml_str = r#"
[feed]
language = "de"

[output]
format = "json"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.feed.language, "de");
    assert_eq!(config.feed.baseline_date, "2023-01-01");
    assert_eq!(config.output.format, ParamsFormat::Json);
    assert_eq!(config.forum.minimum_posts, 10_000);
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_and_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.forum.subreddits = vec!["wheatbelt".to_string()];
    config.decoder.poll_interval_secs = 10;

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_values_fail_to_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[feed]\nbaseline_date = \"01/01/2023\"\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("baseline_date"));
}

#[test]
fn malformed_toml_reports_the_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[forum\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn output_directory_expands_home() {
    let config = Config::default();
    let dir = config.output_directory();
    assert!(!dir.to_string_lossy().starts_with("~/"));
    assert!(dir.ends_with(".local/share/harvest/params"));
}

#[test]
fn absolute_output_directory_is_kept() {
    let mut config = Config::default();
    config.output.directory = "/srv/params".to_string();
    assert_eq!(config.output_directory(), std::path::PathBuf::from("/srv/params"));
}
