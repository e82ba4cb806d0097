use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Narrowest width help text can be wrapped to.
const MIN_WIDTH: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read help settings from '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `<config dir>/deepflags/config.toml`, or `./deepflags/config.toml` when
    /// the platform has no config directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("deepflags")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Read, parse, and validate `path`. A file that does not exist means
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), help = ?config.help, "config loaded");
        Ok(config)
    }

    /// Reject settings the help printer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let help = &self.help;
        if help.indent_step == 0 {
            return Err(ConfigError::ValidationError {
                message: "help.indent_step must be at least 1".to_string(),
            });
        }

        match help.width {
            Some(width) if width < MIN_WIDTH => Err(ConfigError::ValidationError {
                message: format!(
                    "help.width must be at least {} columns, got {}",
                    MIN_WIDTH, width
                ),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_indent_is_rejected() {
        let mut config = Config::default();
        config.help.indent_step = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn narrow_width_is_rejected() {
        let mut config = Config::default();
        config.help.width = Some(10);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least 20 columns, got 10"));

        config.help.width = Some(MIN_WIDTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_path_ends_with_crate_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("deepflags/config.toml"));
    }
}
