// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device-local secret storage crypto.
//!
//! Decrypted key passphrases must never survive in the clear past the
//! function that produced them; [`KeystoreCrypto`] re-encrypts them under
//! a device-bound AES-256-GCM key so they can be held in memory or handed
//! to an external secure key-value store. The key is either ephemeral
//! (one unlock session) or derived from a device secret via Argon2id.

use keywarden_config::KdfConfig;
use keywarden_core::{EncryptedByteArray, KeywardenError, PlainByteArray};
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use crate::{kdf, primitives};

/// AES-256-GCM key for local-only re-encryption of secret material.
///
/// Debug output intentionally omits the key.
pub struct KeystoreCrypto {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for KeystoreCrypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoreCrypto")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl KeystoreCrypto {
    /// Create a keystore with a fresh random key.
    ///
    /// Secrets encrypted under an ephemeral keystore are unreadable after
    /// the session ends, which is the intended lifetime for vault unlock
    /// sessions.
    pub fn ephemeral() -> Result<Self, KeywardenError> {
        Ok(Self {
            key: primitives::generate_key()?,
        })
    }

    /// Derive the keystore key from a device secret via Argon2id.
    ///
    /// The caller owns the salt and must persist it alongside whatever
    /// store the encrypted values land in.
    pub fn derive(
        device_secret: &SecretString,
        salt: &[u8; 16],
        config: &KdfConfig,
    ) -> Result<Self, KeywardenError> {
        let key = kdf::derive_key_with_config(
            device_secret.expose_secret().as_bytes(),
            salt,
            config,
        )?;
        Ok(Self { key })
    }

    /// Encrypt plaintext secret bytes for local storage.
    pub fn encrypt(&self, plain: &PlainByteArray) -> Result<EncryptedByteArray, KeywardenError> {
        primitives::seal(&self.key, plain.as_slice()).map(EncryptedByteArray::new)
    }

    /// Decrypt locally stored secret bytes back into a scoped plaintext
    /// holder.
    pub fn decrypt(
        &self,
        encrypted: &EncryptedByteArray,
    ) -> Result<PlainByteArray, KeywardenError> {
        primitives::open(&self.key, encrypted.as_slice()).map(PlainByteArray::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_kdf() -> KdfConfig {
        KdfConfig {
            memory_cost: 32768,
            iterations: 2,
            parallelism: 1,
        }
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let keystore = KeystoreCrypto::ephemeral().unwrap();
        let plain = PlainByteArray::new(b"item key passphrase".to_vec());

        let encrypted = keystore.encrypt(&plain).unwrap();
        let decrypted = keystore.decrypt(&encrypted).unwrap();

        assert_eq!(decrypted.as_slice(), plain.as_slice());
    }

    #[test]
    fn different_keystores_cannot_cross_decrypt() {
        let keystore1 = KeystoreCrypto::ephemeral().unwrap();
        let keystore2 = KeystoreCrypto::ephemeral().unwrap();

        let encrypted = keystore1
            .encrypt(&PlainByteArray::new(b"secret".to_vec()))
            .unwrap();
        assert!(keystore2.decrypt(&encrypted).is_err());
    }

    #[test]
    fn derived_keystore_is_deterministic_for_same_secret_and_salt() {
        let secret = SecretString::from("device secret".to_string());
        let salt = [5u8; 16];

        let keystore1 = KeystoreCrypto::derive(&secret, &salt, &test_kdf()).unwrap();
        let keystore2 = KeystoreCrypto::derive(&secret, &salt, &test_kdf()).unwrap();

        let encrypted = keystore1
            .encrypt(&PlainByteArray::new(b"payload".to_vec()))
            .unwrap();
        let decrypted = keystore2.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted.as_slice(), b"payload");
    }

    #[test]
    fn wrong_device_secret_fails_decryption() {
        let salt = [6u8; 16];
        let keystore1 = KeystoreCrypto::derive(
            &SecretString::from("correct".to_string()),
            &salt,
            &test_kdf(),
        )
        .unwrap();
        let keystore2 = KeystoreCrypto::derive(
            &SecretString::from("wrong".to_string()),
            &salt,
            &test_kdf(),
        )
        .unwrap();

        let encrypted = keystore1
            .encrypt(&PlainByteArray::new(b"payload".to_vec()))
            .unwrap();
        assert!(keystore2.decrypt(&encrypted).is_err());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let keystore = KeystoreCrypto::ephemeral().unwrap();
        let debug = format!("{keystore:?}");
        assert!(debug.contains("REDACTED"));
    }
}
