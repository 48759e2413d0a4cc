use crate::error::Error;
use crate::units;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_THRESHOLD_GB: u64 = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub root_path: Option<String>,
    /// Free space to maintain, in whole gigabytes.
    #[serde(default = "default_threshold_gb")]
    pub threshold_gb: u64,
    /// Deletion worker threads; 0 means one per CPU.
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub follow_links: bool,
}

fn default_threshold_gb() -> u64 {
    DEFAULT_THRESHOLD_GB
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            threshold_gb: DEFAULT_THRESHOLD_GB,
            workers: 0,
            dry_run: false,
            follow_links: false,
        }
    }
}

impl AppConfig {
    pub fn threshold_bytes(&self) -> Result<u64, Error> {
        units::gib_to_bytes(self.threshold_gb)
            .ok_or_else(|| Error::InvalidThreshold(self.threshold_gb.to_string()))
    }
}

/// Load settings from `Shrinker.{toml,yaml,json,...}` in the working directory
/// (or from `path` when given, which must then exist), overlaid by `SHRINKER_*`
/// environment variables.
pub fn load_configuration(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file_source = match path {
        Some(path) => ConfigFile::from(path).required(true),
        None => ConfigFile::with_name("Shrinker").required(false),
    };
    let builder = Config::builder()
        .add_source(file_source)
        .add_source(Environment::with_prefix("SHRINKER").try_parsing(true))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Parse a threshold given in whole gigabytes into bytes.
pub fn parse_threshold_gb(value: &str) -> Result<u64, Error> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(units::gib_to_bytes)
        .ok_or_else(|| Error::InvalidThreshold(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::GIB;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_threshold_gb() {
        assert_eq!(parse_threshold_gb("20").unwrap(), 20 * GIB);
        assert_eq!(parse_threshold_gb(" 7 ").unwrap(), 7 * GIB);
        assert_eq!(parse_threshold_gb("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_threshold_gb_rejects_garbage() {
        for bad in ["abc", "1.5", "-3", "", "99999999999999999999"] {
            assert!(
                matches!(parse_threshold_gb(bad), Err(Error::InvalidThreshold(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.threshold_bytes().unwrap(), 20 * GIB);
        assert!(config.root_path.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_load_configuration_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shrinker.toml");
        fs::write(
            &path,
            "root_path = \"/srv/recordings\"\nthreshold_gb = 50\nworkers = 4\n",
        )
        .unwrap();

        let config = load_configuration(Some(&path)).unwrap();
        assert_eq!(config.root_path.as_deref(), Some("/srv/recordings"));
        assert_eq!(config.threshold_gb, 50);
        assert_eq!(config.workers, 4);
        assert!(!config.follow_links);
    }

    #[test]
    fn test_load_configuration_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_configuration(Some(&path)).is_err());
    }
}
