// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dependency-injected crypto engine handle.
//!
//! Every operation takes `&CryptoEngine` explicitly; there is no ambient
//! crypto context. The engine is immutable after construction and safe to
//! share across threads -- no interior mutability, no locks.

use keywarden_config::{ContentConfig, KdfConfig, KeywardenConfig};
use keywarden_core::KeywardenError;

use crate::keystore::KeystoreCrypto;

/// Shared handle bundling the device keystore crypto with the
/// configuration the crypto core needs.
#[derive(Debug)]
pub struct CryptoEngine {
    keystore: KeystoreCrypto,
    config: KeywardenConfig,
}

impl CryptoEngine {
    pub fn new(keystore: KeystoreCrypto, config: KeywardenConfig) -> Self {
        Self { keystore, config }
    }

    /// Engine with an ephemeral keystore key and default configuration.
    ///
    /// Suitable for one unlock session; locally encrypted values are
    /// unreadable once the engine is dropped.
    pub fn ephemeral() -> Result<Self, KeywardenError> {
        Ok(Self {
            keystore: KeystoreCrypto::ephemeral()?,
            config: KeywardenConfig::default(),
        })
    }

    pub fn keystore(&self) -> &KeystoreCrypto {
        &self.keystore
    }

    pub fn kdf(&self) -> &KdfConfig {
        &self.config.kdf
    }

    pub fn content(&self) -> &ContentConfig {
        &self.config.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_core::PlainByteArray;

    #[test]
    fn ephemeral_engine_exposes_working_keystore() {
        let engine = CryptoEngine::ephemeral().unwrap();
        let plain = PlainByteArray::new(b"scoped secret".to_vec());
        let encrypted = engine.keystore().encrypt(&plain).unwrap();
        let decrypted = engine.keystore().decrypt(&encrypted).unwrap();
        assert_eq!(decrypted.as_slice(), plain.as_slice());
    }

    #[test]
    fn engine_carries_config_defaults() {
        let engine = CryptoEngine::ephemeral().unwrap();
        assert_eq!(engine.kdf().memory_cost, KdfConfig::default().memory_cost);
        assert_eq!(
            engine.content().max_content_size,
            ContentConfig::default().max_content_size
        );
    }
}
