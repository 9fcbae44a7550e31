//! Configuration management for docmap.
//!
//! Parses `docmap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `convert.file`
//! - `convert.dir`

mod expand;

use std::path::{Path, PathBuf};

use docmap_core::ConvertRequest;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override navigation file.
    pub file: Option<PathBuf>,
    /// Override target directory.
    pub dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmap.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion configuration (paths are relative strings from TOML).
    convert: ConvertConfigRaw,

    /// Resolved conversion configuration (set after loading).
    #[serde(skip)]
    pub convert_resolved: ConvertConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw conversion configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConvertConfigRaw {
    file: Option<String>,
    dir: Option<String>,
}

/// Resolved conversion configuration with paths joined to the config directory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Navigation file to convert.
    pub file: Option<PathBuf>,
    /// Directory holding the content files.
    pub dir: Option<PathBuf>,
}

impl ConvertConfig {
    /// Build the conversion request.
    ///
    /// Missing values stay unset so the converter reports which one is absent.
    #[must_use]
    pub fn to_request(&self) -> ConvertRequest {
        ConvertRequest {
            file: self.file.clone(),
            dir: self.dir.clone(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`convert.file`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require an optional string field to be non-empty when present.
fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    if value.is_some_and(|v| v.trim().is_empty()) {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docmap.toml` in current directory and parents.
    /// Without any config file, only the CLI settings apply.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(file) = &settings.file {
            self.convert_resolved.file = Some(file.clone());
        }
        if let Some(dir) = &settings.dir {
            self.convert_resolved.dir = Some(dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a configured path is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(self.convert.file.as_deref(), "convert.file")?;
        require_non_empty(self.convert.dir.as_deref(), "convert.dir")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref file) = self.convert.file {
            self.convert.file = Some(expand::expand_env(file, "convert.file")?);
        }
        if let Some(ref dir) = self.convert.dir {
            self.convert.dir = Some(expand::expand_env(dir, "convert.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>| path.map(|p| config_dir.join(p));

        self.convert_resolved = ConvertConfig {
            file: resolve(self.convert.file.as_deref()),
            dir: resolve(self.convert.dir.as_deref()),
        };
    }
}
