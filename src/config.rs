//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/snailfish/snailfish.toml`
//! 3. Local config: `./.snailfish.toml`, or the file passed with `--config`
//! 4. Environment variables: `SNAILFISH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::reducer::{
    Reducer, DEFAULT_EXPLODE_DEPTH, DEFAULT_MAX_STEPS, DEFAULT_SPLIT_THRESHOLD,
};

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".snailfish.toml";

/// Reduction rule tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReductionSettings {
    /// Pairs nested at least this deep explode
    pub explode_depth: usize,
    /// Leaves holding at least this value split
    pub split_threshold: u32,
    /// Iteration ceiling for a single reduction
    pub max_steps: usize,
}

impl Default for ReductionSettings {
    fn default() -> Self {
        Self {
            explode_depth: DEFAULT_EXPLODE_DEPTH,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ReductionSettings {
    pub fn reducer(&self) -> Reducer {
        Reducer::new(self.explode_depth, self.split_threshold, self.max_steps)
    }
}

/// Input handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputSettings {
    /// Skip blank lines instead of rejecting them
    pub skip_blank_lines: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            skip_blank_lines: true,
        }
    }
}

/// Raw reduction settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawReductionSettings {
    pub explode_depth: Option<usize>,
    pub split_threshold: Option<u32>,
    pub max_steps: Option<usize>,
}

/// Raw input settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawInputSettings {
    pub skip_blank_lines: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub reduction: RawReductionSettings,
    pub input: RawInputSettings,
}

/// Unified configuration for snailfish.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub reduction: ReductionSettings,
    pub input: InputSettings,
}

/// Get the XDG config directory for snailfish.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "snailfish").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("snailfish.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let reduction = &overlay.reduction;
        Self {
            reduction: ReductionSettings {
                explode_depth: reduction
                    .explode_depth
                    .unwrap_or(self.reduction.explode_depth),
                split_threshold: reduction
                    .split_threshold
                    .unwrap_or(self.reduction.split_threshold),
                max_steps: reduction.max_steps.unwrap_or(self.reduction.max_steps),
            },
            input: InputSettings {
                skip_blank_lines: overlay
                    .input
                    .skip_blank_lines
                    .unwrap_or(self.input.skip_blank_lines),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional local config file; when None, `./.snailfish.toml`
    ///   is used if it exists. An explicitly given file must exist.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/snailfish/snailfish.toml`
    /// 3. Local config
    /// 4. Environment variables: `SNAILFISH_*` prefix
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        match local {
            Some(path) => {
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                let cwd = std::env::current_dir().map_err(|e| ApplicationError::Config {
                    message: format!("current directory: {e}"),
                })?;
                let local_path = local_config_path(&cwd);
                if local_path.exists() {
                    current = current.merge_with(&load_raw_settings(&local_path)?);
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply SNAILFISH_* environment variables as explicit overrides.
    ///
    /// Nested keys use a double underscore: `SNAILFISH_REDUCTION__MAX_STEPS=500`.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SNAILFISH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        let overlay = RawSettings {
            reduction: RawReductionSettings {
                explode_depth: optional(config.get::<usize>("reduction.explode_depth"))?,
                split_threshold: optional(config.get::<u32>("reduction.split_threshold"))?,
                max_steps: optional(config.get::<usize>("reduction.max_steps"))?,
            },
            input: RawInputSettings {
                skip_blank_lines: optional(config.get::<bool>("input.skip_blank_lines"))?,
            },
        };
        Ok(settings.merge_with(&overlay))
    }

    /// Reject values the reducer cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let invalid = |message: &str| {
            Err(ApplicationError::Config {
                message: message.to_string(),
            })
        };
        if self.reduction.explode_depth == 0 {
            return invalid("reduction.explode_depth must be at least 1");
        }
        if self.reduction.split_threshold < 2 {
            return invalid("reduction.split_threshold must be at least 2");
        }
        if self.reduction.max_steps == 0 {
            return invalid("reduction.max_steps must be at least 1");
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# snailfish configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/snailfish/snailfish.toml
#   Local:  ./.snailfish.toml (or --config <FILE>)
#   Env:    SNAILFISH_* environment variables, e.g. SNAILFISH_REDUCTION__MAX_STEPS=500

[reduction]
# Pairs nested at least this deep explode
# explode_depth = 4

# Regular numbers at or above this value split
# split_threshold = 10

# Give up when one reduction needs more rewrites than this
# max_steps = 10000

[input]
# Skip blank lines in puzzle input (false: treat them as an error)
# skip_blank_lines = true
"#
        .to_string()
    }
}

/// A missing key is "not specified"; anything else is a real error.
fn optional<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
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
    fn given_defaults_when_created_then_match_puzzle_rules() {
        let settings = Settings::default();
        assert_eq!(settings.reduction.explode_depth, 4);
        assert_eq!(settings.reduction.split_threshold, 10);
        assert_eq!(settings.reduction.max_steps, 10_000);
        assert!(settings.input.skip_blank_lines);
        assert_eq!(settings.reduction.reducer(), Reducer::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let overlay: RawSettings = toml::from_str("[reduction]\nmax_steps = 50\n").unwrap();
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.reduction.max_steps, 50);
        assert_eq!(merged.reduction.explode_depth, 4);
        assert!(merged.input.skip_blank_lines);
    }

    #[test]
    fn given_zero_depth_when_validating_then_errors() {
        let mut settings = Settings::default();
        settings.reduction.explode_depth = 0;
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips() {
        let toml_str = Settings::default().to_toml().unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
