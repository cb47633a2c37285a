use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::version::DeriveOptions;

/// Default indentation of rewritten composer.json files
pub const DEFAULT_MANIFEST_INDENT: usize = 4;

/// Default log level when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

const APP_NAME: &str = "composer-version";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub derive: DeriveOptions,
    pub manifest: ManifestConfig,
    pub log: LogConfig,
}

/// composer.json rewriting
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestConfig {
    /// Number of spaces per indentation level
    pub indent: usize,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_MANIFEST_INDENT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    /// Load configuration from a JSON file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for composer-version.
/// Uses $XDG_DATA_HOME/composer-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/composer-version,
/// or ./composer-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{APP_NAME}.log"))
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "log": {
                "json": true
            }
        }))
        .unwrap();

        assert!(result.log.json);
        assert_eq!(result.log.level, DEFAULT_LOG_LEVEL);
        assert_eq!(result.manifest, ManifestConfig::default());
        assert_eq!(result.derive, DeriveOptions::default());
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "derive": { "collapseWildcards": false },
            "manifest": { "indent": 2 },
            "log": { "level": "debug", "json": true }
        }))
        .unwrap();

        assert_eq!(
            result,
            Config {
                derive: DeriveOptions {
                    collapse_wildcards: false
                },
                manifest: ManifestConfig { indent: 2 },
                log: LogConfig {
                    level: "debug".to_string(),
                    json: true
                },
            }
        );
    }

    #[test]
    fn load_without_path_returns_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"derive": {{"collapseWildcards": false}}}}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert!(!config.derive.collapse_wildcards);
    }

    #[test]
    fn load_reports_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/composer-version.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/composer-version"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/composer-version")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./composer-version"));
    }
}
