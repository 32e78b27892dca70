//! Integration tests for Settings config loading.
//!
//! These tests only write temp files; a global config on the test host would
//! be layered underneath, so assertions always use an explicit file.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use romanum::application::ApplicationError;
use romanum::config::Settings;
use romanum::{parse, MaxRepetitions};

#[test]
fn given_config_file_with_four_when_load_then_allows_four_repetitions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("romanum.toml");
    fs::write(&path, "max_repetitions = 4\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.max_repetitions, MaxRepetitions::Four);
    assert_eq!(parse("IIII", settings.parse_options()), Ok(4));
}

#[test]
fn given_config_file_with_three_when_load_then_rejects_four_repetitions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("romanum.toml");
    fs::write(&path, "max_repetitions = 3\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.max_repetitions, MaxRepetitions::Three);
    assert!(parse("IIII", settings.parse_options()).is_err());
}

#[test]
fn given_out_of_range_value_when_load_then_returns_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("romanum.toml");
    fs::write(&path, "max_repetitions = 5\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("3 or 4"), "{}", err);
}

#[test]
fn given_malformed_toml_when_load_then_returns_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("romanum.toml");
    fs::write(&path, "max_repetitions = \n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("parse"), "{}", err);
}

#[test]
fn given_missing_config_file_when_load_then_returns_config_error() {
    let err = Settings::load(Some(Path::new("/nonexistent/romanum.toml"))).unwrap_err();

    assert!(err.to_string().contains("read"), "{}", err);
}

#[test]
fn given_settings_when_round_tripping_toml_then_preserves_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("romanum.toml");
    let original = Settings {
        max_repetitions: MaxRepetitions::Four,
    };
    fs::write(&path, original.to_toml().unwrap()).unwrap();

    assert_eq!(Settings::load(Some(&path)).unwrap(), original);
}
