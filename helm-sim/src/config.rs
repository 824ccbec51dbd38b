//! Configuration loading
//!
//! Uses the embedded robot.toml unless a path is given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use helm_core::config::{ConfigError, RobotConfig};

/// Embedded default configuration (compiled into the binary)
pub const EMBEDDED_CONFIG: &str = include_str!("../robot.toml");

/// Errors that can occur while loading a configuration
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0:?}")]
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Parse and validate a TOML configuration
pub fn parse_config(text: &str) -> Result<RobotConfig, LoadError> {
    let config: RobotConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load from `path`, or the embedded configuration when `None`
pub fn load_config(path: Option<&Path>) -> Result<RobotConfig, LoadError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text)
        }
        None => parse_config(EMBEDDED_CONFIG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_core::traits::BrakeMode;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, RobotConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config(
            r#"
            [drive]
            brake = "hold"

            [watch]
            timeout_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.drive.brake, BrakeMode::Hold);
        assert_eq!(config.drive.track_width_in, 13.0);
        assert_eq!(config.watch.poll_interval_ms, 20);
        assert_eq!(config.watch.timeout_ms, Some(500));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let result = parse_config("[watch]\npoll_interval_ms = 0\n");
        assert!(matches!(
            result,
            Err(LoadError::Invalid(ConfigError::ZeroPollInterval))
        ));
    }

    #[test]
    fn test_rejects_bad_toml() {
        assert!(matches!(parse_config("[drive"), Err(LoadError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/robot.toml")));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
