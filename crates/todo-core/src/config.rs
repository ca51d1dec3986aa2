use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ID_LENGTH_ENV: &str = "AGENT_TODO_ID_LENGTH";
pub const MAX_ID_ATTEMPTS_ENV: &str = "AGENT_TODO_MAX_ID_ATTEMPTS";

const MIN_ID_LENGTH: usize = 4;
const MAX_ID_LENGTH: usize = 32;

/// Tunables for a [`crate::TodoStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of hex characters in generated todo ids.
    pub id_length: usize,
    /// Draws allowed when a generated id is already taken in the collection.
    pub max_id_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_length: 6,
            max_id_attempts: 8,
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the optional TOML file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ID_LENGTH_ENV) {
            match raw.trim().parse() {
                Ok(value) => self.id_length = value,
                Err(_) => warn!("Ignoring {}={:?}: not a number", ID_LENGTH_ENV, raw),
            }
        }
        if let Some(raw) = lookup(MAX_ID_ATTEMPTS_ENV) {
            match raw.trim().parse() {
                Ok(value) => self.max_id_attempts = value,
                Err(_) => warn!("Ignoring {}={:?}: not a number", MAX_ID_ATTEMPTS_ENV, raw),
            }
        }
        self
    }

    pub fn effective_id_length(&self) -> usize {
        self.id_length.clamp(MIN_ID_LENGTH, MAX_ID_LENGTH)
    }

    pub fn effective_max_id_attempts(&self) -> u32 {
        self.max_id_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = StoreConfig::from_toml_str("id_length = 10").unwrap();
        assert_eq!(config.id_length, 10);
        assert_eq!(config.max_id_attempts, 8);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            StoreConfig::from_toml_str("id_length = \"six\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id_length = 12\nmax_id_attempts = 3").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.id_length, 12);
        assert_eq!(config.max_id_attempts, 3);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            StoreConfig::from_file(&path),
            Err(ConfigError::Io { path: reported, .. }) if reported == path
        ));
    }

    #[test]
    fn overrides_apply_and_bad_values_are_ignored() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ID_LENGTH_ENV, " 9 "), (MAX_ID_ATTEMPTS_ENV, "many")]);

        let config = StoreConfig::default()
            .with_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.id_length, 9);
        assert_eq!(config.max_id_attempts, 8);
    }

    #[test]
    fn id_length_is_clamped() {
        let short = StoreConfig {
            id_length: 1,
            ..Default::default()
        };
        let long = StoreConfig {
            id_length: 64,
            ..Default::default()
        };
        assert_eq!(short.effective_id_length(), 4);
        assert_eq!(long.effective_id_length(), 32);
    }
}
