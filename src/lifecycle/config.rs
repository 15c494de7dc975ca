//! Queue configuration.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! vocabulary = ["Caffe Latte", "Cappuccino", "Espresso"]
//! threshold = 3
//! departure_offset = 7
//! first_position = 1
//! buffer_size = 32
//! ```

use crate::resolver::{Vocabulary, DEFAULT_THRESHOLD};
use crate::subscriber::DEFAULT_DEPARTURE_OFFSET;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Vocabulary must contain at least one item")]
    EmptyVocabulary,

    #[error("Vocabulary lists {0:?} more than once")]
    DuplicateItem(String),

    #[error("buffer_size must be greater than zero")]
    ZeroBufferSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Canonical item names, in tie-break order.
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// Largest edit distance a request may be from the item it resolves to.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// How far past their own number a customer waits before leaving.
    #[serde(default = "default_departure_offset")]
    pub departure_offset: u64,
    /// Position handed to the first automatically admitted order.
    #[serde(default = "default_first_position")]
    pub first_position: u64,
    /// Capacity of the channel actor's request queue.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}

fn default_departure_offset() -> u64 {
    DEFAULT_DEPARTURE_OFFSET
}

fn default_first_position() -> u64 {
    1
}

fn default_buffer_size() -> usize {
    32
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            threshold: default_threshold(),
            departure_offset: default_departure_offset(),
            first_position: default_first_position(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl QueueConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: QueueConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vocabulary.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        let mut seen = HashSet::new();
        for item in self.vocabulary.iter() {
            if !seen.insert(item) {
                return Err(ConfigError::DuplicateItem(item.to_string()));
            }
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = QueueConfig::from_toml_str("").unwrap();
        assert_eq!(config, QueueConfig::default());
        assert_eq!(config.threshold, 3);
        assert_eq!(config.departure_offset, 7);
        assert_eq!(config.vocabulary.len(), 6);
    }

    #[test]
    fn test_overrides() {
        let config = QueueConfig::from_toml_str(
            r#"
            vocabulary = ["Tea", "Coffee"]
            threshold = 1
            departure_offset = 2
            first_position = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.vocabulary, Vocabulary::new(["Tea", "Coffee"]));
        assert_eq!(config.threshold, 1);
        assert_eq!(config.departure_offset, 2);
        assert_eq!(config.first_position, 100);
        assert_eq!(config.buffer_size, 32);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            QueueConfig::from_toml_str("vocabulary = []"),
            Err(ConfigError::EmptyVocabulary)
        ));
        assert!(matches!(
            QueueConfig::from_toml_str(r#"vocabulary = ["Tea", "Tea"]"#),
            Err(ConfigError::DuplicateItem(item)) if item == "Tea"
        ));
        assert!(matches!(
            QueueConfig::from_toml_str("buffer_size = 0"),
            Err(ConfigError::ZeroBufferSize)
        ));
        assert!(matches!(
            QueueConfig::from_toml_str("threshold = -1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = QueueConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
