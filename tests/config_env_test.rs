//! Integration tests for the ROMANUM_* environment layer.
//!
//! Kept in their own test binary so the process environment never leaks into
//! the file-based config tests. Tests here share one lock.

use std::env;
use std::fs;
use std::sync::Mutex;

use clap::Parser;
use tempfile::TempDir;

use romanum::application::ApplicationError;
use romanum::cli::args::Cli;
use romanum::cli::commands::resolve_settings;
use romanum::config::Settings;
use romanum::{exitcode, parse, MaxRepetitions};

const VAR: &str = "ROMANUM_MAX_REPETITIONS";

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn with_env<T>(value: &str, f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var(VAR, value);
    let result = f();
    env::remove_var(VAR);
    result
}

#[test]
fn given_env_four_when_load_then_allows_four_repetitions() {
    let settings = with_env("4", || Settings::load(None)).expect("load settings");

    assert_eq!(settings.max_repetitions, MaxRepetitions::Four);
    assert_eq!(parse("IIII", settings.parse_options()), Ok(4));
}

#[test]
fn given_env_five_when_load_then_returns_config_error() {
    let err = with_env("5", || Settings::load(None)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(VAR), "{}", err);
    assert!(err.to_string().contains("3 or 4"), "{}", err);
}

#[test]
fn given_env_and_config_file_when_load_then_env_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("romanum.toml");
    fs::write(&path, "max_repetitions = 3\n").unwrap();

    let settings = with_env("4", || Settings::load(Some(&path))).expect("load settings");

    assert_eq!(settings.max_repetitions, MaxRepetitions::Four);
}

#[test]
fn given_env_five_when_resolving_cli_settings_then_exits_with_config_code() {
    let cli = Cli::try_parse_from(["romanum", "parse", "XIV"]).unwrap();

    let err = with_env("5", || resolve_settings(&cli)).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_env_three_and_flag_four_when_resolving_cli_settings_then_flag_wins() {
    let cli = Cli::try_parse_from(["romanum", "-m", "4", "parse", "IIII"]).unwrap();

    let settings = with_env("3", || resolve_settings(&cli)).expect("resolve settings");

    assert_eq!(settings.max_repetitions, MaxRepetitions::Four);
}
