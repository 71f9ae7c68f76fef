// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keywarden.toml` > `~/.config/keywarden/keywarden.toml`
//! > `/etc/keywarden/keywarden.toml` with environment variable overrides
//! via `KEYWARDEN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::KeywardenConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keywarden/keywarden.toml` (system-wide)
/// 3. `~/.config/keywarden/keywarden.toml` (user XDG config)
/// 4. `./keywarden.toml` (local directory)
/// 5. `KEYWARDEN_*` environment variables
pub fn load_config() -> Result<KeywardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardenConfig::default()))
        .merge(Toml::file("/etc/keywarden/keywarden.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("keywarden/keywarden.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("keywarden.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<KeywardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KeywardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeywardenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `KEYWARDEN_KDF_MEMORY_COST` must map
/// to `kdf.memory_cost`, not `kdf.memory.cost`.
fn env_provider() -> Env {
    Env::prefixed("KEYWARDEN_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("kdf_", "kdf.", 1)
            .replacen("content_", "content.", 1);
        mapped.into()
    })
}
