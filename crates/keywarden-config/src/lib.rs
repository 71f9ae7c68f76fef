// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Keywarden crypto core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use keywarden_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Argon2id iterations: {}", config.kdf.iterations);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ContentConfig, KdfConfig, KeywardenConfig};
pub use validation::{validate_config, ConfigError};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment deserialization errors are rendered as a single [`ConfigError`];
/// range validation failures are collected per-key.
pub fn load_and_validate() -> Result<KeywardenConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError {
            key: err
                .path
                .first()
                .cloned()
                .unwrap_or_else(|| "<config>".to_string()),
            reason: err.to_string(),
        }]),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<KeywardenConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError {
            key: err
                .path
                .first()
                .cloned()
                .unwrap_or_else(|| "<config>".to_string()),
            reason: err.to_string(),
        }]),
    }
}
