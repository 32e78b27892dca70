//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/romanum/romanum.toml`
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment variables: `ROMANUM_*` prefix
//!
//! CLI flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{MaxRepetitions, ParseOptions};

/// Unified configuration for romanum.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Longest allowed run of one numeral (3 or 4)
    pub max_repetitions: MaxRepetitions,
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_repetitions: Option<MaxRepetitions>,
}

/// Get the XDG config directory for romanum.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "romanum").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("romanum.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Derive parser options from the settings.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new(self.max_repetitions)
    }

    /// Overlay wins if it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_repetitions: overlay.max_repetitions.unwrap_or(self.max_repetitions),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let path = expand_path(path);
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply ROMANUM_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ROMANUM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        match config.get_int("max_repetitions") {
            Ok(val) => {
                settings.max_repetitions = u8::try_from(val)
                    .map_err(|e| e.to_string())
                    .and_then(MaxRepetitions::try_from)
                    .map_err(|message| ApplicationError::Config {
                        message: format!("ROMANUM_MAX_REPETITIONS: {message}"),
                    })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# romanum configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/romanum/romanum.toml
#   File:   --config <path>
#   Env:    ROMANUM_* environment variables
#   Flags:  --max-repetitions

# Longest run of one numeral: 3 (III) or 4 (IIII, clock-face style)
# max_repetitions = 3
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_then_allow_three_repetitions() {
        let settings = Settings::default();
        assert_eq!(settings.max_repetitions, MaxRepetitions::Three);
        assert_eq!(settings.parse_options(), ParseOptions::default());
    }

    #[test]
    fn given_overlay_without_value_when_merging_then_keeps_base() {
        let base = Settings {
            max_repetitions: MaxRepetitions::Four,
        };
        let merged = base.merge_with(&RawSettings::default());
        assert_eq!(merged.max_repetitions, MaxRepetitions::Four);
    }

    #[test]
    fn given_overlay_with_value_when_merging_then_overlay_wins() {
        let base = Settings::default();
        let overlay = RawSettings {
            max_repetitions: Some(MaxRepetitions::Four),
        };
        assert_eq!(base.merge_with(&overlay).max_repetitions, MaxRepetitions::Four);
    }

    #[test]
    fn given_settings_when_rendering_toml_then_uses_integer() {
        let settings = Settings {
            max_repetitions: MaxRepetitions::Four,
        };
        let rendered = settings.to_toml().unwrap();
        assert_eq!(rendered.trim(), "max_repetitions = 4");
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.max_repetitions.is_none());
    }

    #[test]
    fn given_tilde_path_when_expanding_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/romanum.toml"));
        assert!(expanded.to_string_lossy().starts_with(&home));
    }
}
