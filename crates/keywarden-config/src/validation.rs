// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of configuration values.
//!
//! Figment/serde guarantee shape; this module checks ranges the type
//! system cannot express (Argon2id parameter bounds, content limits).

use thiserror::Error;

use crate::model::KeywardenConfig;

/// A validation failure for a single configuration key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid config value for `{key}`: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub reason: String,
}

impl ConfigError {
    fn new(key: &str, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validate a deserialized config, collecting every failure rather than
/// stopping at the first.
pub fn validate_config(config: &KeywardenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Argon2 lower bounds: 8 KiB per lane, at least one iteration/lane.
    if config.kdf.memory_cost < 8 * config.kdf.parallelism {
        errors.push(ConfigError::new(
            "kdf.memory_cost",
            format!(
                "must be at least 8 KiB per lane ({} lanes configured)",
                config.kdf.parallelism
            ),
        ));
    }
    if config.kdf.iterations == 0 {
        errors.push(ConfigError::new("kdf.iterations", "must be at least 1"));
    }
    if config.kdf.parallelism == 0 {
        errors.push(ConfigError::new("kdf.parallelism", "must be at least 1"));
    }

    if config.content.max_content_size == 0 {
        errors.push(ConfigError::new(
            "content.max_content_size",
            "must be nonzero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentConfig, KdfConfig};

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&KeywardenConfig::default()).is_ok());
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = KeywardenConfig {
            kdf: KdfConfig {
                iterations: 0,
                ..KdfConfig::default()
            },
            content: ContentConfig::default(),
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.key == "kdf.iterations"));
    }

    #[test]
    fn undersized_memory_cost_rejected() {
        let config = KeywardenConfig {
            kdf: KdfConfig {
                memory_cost: 8,
                parallelism: 4,
                ..KdfConfig::default()
            },
            content: ContentConfig::default(),
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.key == "kdf.memory_cost"));
    }

    #[test]
    fn multiple_failures_are_all_collected() {
        let config = KeywardenConfig {
            kdf: KdfConfig {
                memory_cost: 0,
                iterations: 0,
                parallelism: 1,
            },
            content: ContentConfig {
                max_content_size: 0,
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
