//! Process configuration: which backend to use and where its data lives
//!
//! A `Config` is built once at startup (from a YAML file, the environment,
//! or CLI flags) and handed to [`LabelStore::open`](crate::LabelStore::open);
//! nothing here is consulted again after construction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// The storage medium all entities live in for this process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local filesystem tree rooted at a data directory
    Local {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
    /// DynamoDB tables, optionally name-prefixed
    Remote {
        #[serde(default)]
        table_prefix: String,
    },
}

/// Process-wide configuration, fixed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: BackendKind::Local {
                data_dir: default_data_dir(),
            },
        }
    }
}

/// Fallback data directory when none is configured
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("labelstore"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl Config {
    /// Configuration for the filesystem backend rooted at `data_dir`
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            backend: BackendKind::Local {
                data_dir: data_dir.into(),
            },
        }
    }

    /// Configuration for the DynamoDB backend with a table name prefix
    pub fn remote(table_prefix: impl Into<String>) -> Self {
        Config {
            backend: BackendKind::Remote {
                table_prefix: table_prefix.into(),
            },
        }
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Build configuration from `LABELSTORE_*` environment variables
    ///
    /// `LABELSTORE_REMOTE=1` (or `true`) selects the DynamoDB backend with
    /// `LABELSTORE_TABLE_PREFIX`; otherwise the filesystem backend uses
    /// `LABELSTORE_DATA_DIR` or the default data directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let remote = get("LABELSTORE_REMOTE")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        if remote {
            Config::remote(get("LABELSTORE_TABLE_PREFIX").unwrap_or_default())
        } else {
            match get("LABELSTORE_DATA_DIR") {
                Some(dir) => Config::local(dir),
                None => Config::default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_default_is_local() {
        let config = Config::default();
        assert!(matches!(config.backend, BackendKind::Local { .. }));
    }

    #[test]
    fn test_yaml_round_trip() {
        for config in [Config::local("/var/lib/labelstore"), Config::remote("staging_")] {
            let yaml = serde_yaml::to_string(&config).unwrap();
            let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(parsed, config);
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("labelstore.yaml");
        std::fs::write(&path, "backend: !local\n  data_dir: /srv/labels\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::local("/srv/labels"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_bad_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("labelstore.yaml");
        std::fs::write(&path, "backend: [not, a, backend]\n").unwrap();
        assert!(matches!(
            Config::load(&path).unwrap_err(),
            ConfigError::YamlParse(_)
        ));
    }

    #[test]
    fn test_env_selects_local_data_dir() {
        let config = Config::from_lookup(lookup(&[("LABELSTORE_DATA_DIR", "/tmp/labels")]));
        assert_eq!(config, Config::local("/tmp/labels"));
    }

    #[test]
    fn test_env_selects_remote() {
        let config = Config::from_lookup(lookup(&[
            ("LABELSTORE_REMOTE", "true"),
            ("LABELSTORE_TABLE_PREFIX", "prod_"),
        ]));
        assert_eq!(config, Config::remote("prod_"));
    }

    #[test]
    fn test_env_remote_flag_must_be_truthy() {
        let config = Config::from_lookup(lookup(&[("LABELSTORE_REMOTE", "0")]));
        assert!(matches!(config.backend, BackendKind::Local { .. }));
    }

    #[test]
    fn test_env_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
    }
}
