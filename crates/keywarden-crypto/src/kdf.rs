// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id key derivation from a passphrase.
//!
//! Derives a 32-byte key using Argon2id (Algorithm::Argon2id,
//! Version::V0x13). Parameters come from [`KdfConfig`] when locking new
//! key material and from the key blob itself when unlocking, so a key
//! created under one parameter set stays openable after config changes.

use keywarden_config::KdfConfig;
use keywarden_core::KeywardenError;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Derive a 32-byte key from a passphrase using Argon2id.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory
/// zeroing on drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; 16],
    memory_cost: u32,
    iterations: u32,
    parallelism: u32,
) -> Result<Zeroizing<[u8; 32]>, KeywardenError> {
    let params = argon2::Params::new(memory_cost, iterations, parallelism, Some(32))
        .map_err(|e| KeywardenError::Config(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(passphrase, salt, output.as_mut())
        .map_err(|e| KeywardenError::Config(format!("Argon2id key derivation failed: {e}")))?;

    Ok(output)
}

/// Derive a 32-byte key using parameters from config.
pub fn derive_key_with_config(
    passphrase: &[u8],
    salt: &[u8; 16],
    config: &KdfConfig,
) -> Result<Zeroizing<[u8; 32]>, KeywardenError> {
    derive_key(
        passphrase,
        salt,
        config.memory_cost,
        config.iterations,
        config.parallelism,
    )
}

/// Generate a random 16-byte salt for Argon2id.
pub fn generate_salt() -> Result<[u8; 16], KeywardenError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; 16];
    rng.fill(&mut salt)
        .map_err(|_| KeywardenError::Encryption("failed to generate random salt".to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_produces_consistent_output() {
        let salt = [1u8; 16];
        let passphrase = b"test passphrase";

        // Use low cost for fast tests.
        let key1 = derive_key(passphrase, &salt, 32768, 2, 1).unwrap();
        let key2 = derive_key(passphrase, &salt, 32768, 2, 1).unwrap();

        assert_eq!(*key1, *key2);
    }

    #[test]
    fn derive_key_different_passphrase_produces_different_output() {
        let salt = [2u8; 16];

        let key1 = derive_key(b"passphrase one", &salt, 32768, 2, 1).unwrap();
        let key2 = derive_key(b"passphrase two", &salt, 32768, 2, 1).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn derive_key_different_salt_produces_different_output() {
        let passphrase = b"same passphrase";

        let key1 = derive_key(passphrase, &[1u8; 16], 32768, 2, 1).unwrap();
        let key2 = derive_key(passphrase, &[2u8; 16], 32768, 2, 1).unwrap();

        assert_ne!(*key1, *key2);
    }

    #[test]
    fn derive_key_with_config_matches_explicit_params() {
        let config = KdfConfig {
            memory_cost: 32768,
            iterations: 2,
            parallelism: 1,
        };
        let salt = [3u8; 16];
        let from_config = derive_key_with_config(b"pass", &salt, &config).unwrap();
        let explicit = derive_key(b"pass", &salt, 32768, 2, 1).unwrap();
        assert_eq!(*from_config, *explicit);
    }

    #[test]
    fn generate_salt_produces_random_values() {
        let salt1 = generate_salt().unwrap();
        let salt2 = generate_salt().unwrap();

        assert_ne!(salt1, salt2);
    }

    #[test]
    fn invalid_parameters_are_a_config_error() {
        let result = derive_key(b"pass", &[0u8; 16], 1, 0, 0);
        assert!(matches!(result, Err(KeywardenError::Config(_))));
    }
}
