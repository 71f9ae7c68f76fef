// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key blob parsing, fingerprints, and private-half locking.
//!
//! A key blob carries an Ed25519 verifying key and an X25519 encryption
//! key in the clear, plus an optional private half (both secret keys)
//! sealed under an Argon2id-derived key. The Argon2id parameters are
//! stored in the blob so keys stay openable after config changes.
//!
//! The fingerprint is the full SHA-256 digest over the public fields,
//! lowercase hex -- the canonical identity used for signature
//! verification. It is identical for the public-only and
//! private-augmented encodings of the same key.

use ed25519_dalek::{SigningKey as Ed25519SigningKey, VerifyingKey};
use keywarden_config::KdfConfig;
use keywarden_core::{KeywardenError, PlainByteArray};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use crate::{armor, kdf, primitives};

/// Wire format version for key blobs.
const KEY_FORMAT_VERSION: u16 = 1;

/// Domain prefix hashed into every fingerprint.
const FINGERPRINT_DOMAIN: &[u8] = b"keywarden-key-fingerprint-v1";

#[derive(Serialize, Deserialize)]
struct WireKey {
    version: u16,
    verify_key: [u8; 32],
    encrypt_key: [u8; 32],
    private: Option<WireLockedPrivate>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct WireLockedPrivate {
    salt: [u8; 16],
    memory_cost: u32,
    iterations: u32,
    parallelism: u32,
    blob: Vec<u8>,
}

/// The public half of a key: verification and encryption keys.
#[derive(Debug, Clone)]
pub struct PublicKeyMaterial {
    verify_key: VerifyingKey,
    encrypt_key: X25519PublicKey,
}

impl PublicKeyMaterial {
    pub fn verify_key(&self) -> &VerifyingKey {
        &self.verify_key
    }

    pub fn encrypt_key(&self) -> &X25519PublicKey {
        &self.encrypt_key
    }
}

/// An unlocked private half, alive only inside a scoped
/// `with_private_key` call.
pub struct PrivateKeyMaterial {
    signing_key: Ed25519SigningKey,
    decrypt_key: StaticSecret,
}

impl PrivateKeyMaterial {
    pub fn signing_key(&self) -> &Ed25519SigningKey {
        &self.signing_key
    }

    pub fn decrypt_key(&self) -> &StaticSecret {
        &self.decrypt_key
    }
}

impl std::fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKeyMaterial([REDACTED])")
    }
}

/// A parsed key: public half, fingerprint, primary flag, and the locked
/// private half when this device has private access.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    fingerprint: String,
    is_primary: bool,
    public: PublicKeyMaterial,
    locked_private: Option<WireLockedPrivate>,
}

impl KeyMaterial {
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn public(&self) -> &PublicKeyMaterial {
        &self.public
    }

    /// Whether the blob carried a (locked) private half.
    pub fn has_private_access(&self) -> bool {
        self.locked_private.is_some()
    }

    /// Unlock the private half with the given passphrase.
    ///
    /// Fails with `PrivateKeyUnavailable` if the blob had no private
    /// half, `WrongPassphrase` if the passphrase does not open it.
    pub fn unlock_private(
        &self,
        passphrase: &PlainByteArray,
    ) -> Result<PrivateKeyMaterial, KeywardenError> {
        let locked = self
            .locked_private
            .as_ref()
            .ok_or(KeywardenError::PrivateKeyUnavailable)?;

        let key = kdf::derive_key(
            passphrase.as_slice(),
            &locked.salt,
            locked.memory_cost,
            locked.iterations,
            locked.parallelism,
        )?;
        let secret_bytes = Zeroizing::new(
            primitives::open(&key, &locked.blob)
                .map_err(|_| KeywardenError::WrongPassphrase)?,
        );
        if secret_bytes.len() != 64 {
            return Err(KeywardenError::MalformedKey(
                "private key material has unexpected length".to_string(),
            ));
        }

        let mut ed_bytes = [0u8; 32];
        ed_bytes.copy_from_slice(&secret_bytes[..32]);
        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&secret_bytes[32..]);

        let private = PrivateKeyMaterial {
            signing_key: Ed25519SigningKey::from_bytes(&ed_bytes),
            decrypt_key: StaticSecret::from(x_bytes),
        };
        ed_bytes.zeroize();
        x_bytes.zeroize();
        Ok(private)
    }
}

/// Parse an armored key blob into typed key material.
///
/// When a passphrase is supplied the private half is unlocked once to
/// validate it, so a wrong passphrase surfaces at read time rather than
/// deep inside a later operation.
pub fn read_key(
    armored: &str,
    is_primary: bool,
    passphrase: Option<&PlainByteArray>,
) -> Result<KeyMaterial, KeywardenError> {
    let wire = parse_wire_key(armored)?;

    let verify_key = VerifyingKey::from_bytes(&wire.verify_key)
        .map_err(|e| KeywardenError::MalformedKey(format!("invalid verifying key: {e}")))?;
    let encrypt_key = X25519PublicKey::from(wire.encrypt_key);

    let key = KeyMaterial {
        fingerprint: fingerprint_of(&wire.verify_key, &wire.encrypt_key),
        is_primary,
        public: PublicKeyMaterial {
            verify_key,
            encrypt_key,
        },
        locked_private: wire.private,
    };

    if let Some(passphrase) = passphrase {
        if !key.has_private_access() {
            return Err(KeywardenError::PrivateKeyUnavailable);
        }
        key.unlock_private(passphrase)?;
    }

    Ok(key)
}

/// Compute the long-form fingerprint of an armored key blob.
pub fn fingerprint(armored: &str) -> Result<String, KeywardenError> {
    let wire = parse_wire_key(armored)?;
    Ok(fingerprint_of(&wire.verify_key, &wire.encrypt_key))
}

/// Generate a fresh keypair locked under `passphrase`, returning the
/// armored blob.
///
/// Used when creating a vault or registering a new key rotation.
pub fn generate_locked_key(
    passphrase: &PlainByteArray,
    config: &KdfConfig,
) -> Result<String, KeywardenError> {
    let signing_key = Ed25519SigningKey::generate(&mut OsRng);
    let decrypt_key = StaticSecret::random_from_rng(OsRng);

    let verify_key = signing_key.verifying_key().to_bytes();
    let encrypt_key = X25519PublicKey::from(&decrypt_key).to_bytes();

    let mut secret_bytes = Zeroizing::new([0u8; 64]);
    secret_bytes[..32].copy_from_slice(&signing_key.to_bytes());
    secret_bytes[32..].copy_from_slice(decrypt_key.as_bytes());

    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key_with_config(passphrase.as_slice(), &salt, config)?;
    let blob = primitives::seal(&key, &secret_bytes[..])?;

    let wire = WireKey {
        version: KEY_FORMAT_VERSION,
        verify_key,
        encrypt_key,
        private: Some(WireLockedPrivate {
            salt,
            memory_cost: config.memory_cost,
            iterations: config.iterations,
            parallelism: config.parallelism,
            blob,
        }),
    };
    let bytes = bincode::serialize(&wire)
        .map_err(|e| KeywardenError::Encryption(format!("key blob encoding failed: {e}")))?;
    Ok(armor::encode(&bytes))
}

/// Strip the private half from an armored key blob.
///
/// Produces the public-only encoding shared with other vault members;
/// the fingerprint is unchanged.
pub fn strip_private(armored: &str) -> Result<String, KeywardenError> {
    let mut wire = parse_wire_key(armored)?;
    wire.private = None;
    let bytes = bincode::serialize(&wire)
        .map_err(|e| KeywardenError::Encryption(format!("key blob encoding failed: {e}")))?;
    Ok(armor::encode(&bytes))
}

fn parse_wire_key(armored: &str) -> Result<WireKey, KeywardenError> {
    let bytes = armor::decode(armored)
        .map_err(|e| KeywardenError::MalformedKey(format!("invalid key armor: {e}")))?;
    let wire: WireKey = bincode::deserialize(&bytes)
        .map_err(|e| KeywardenError::MalformedKey(format!("invalid key blob: {e}")))?;
    if wire.version != KEY_FORMAT_VERSION {
        return Err(KeywardenError::MalformedKey(format!(
            "unsupported key format version {}",
            wire.version
        )));
    }
    Ok(wire)
}

fn fingerprint_of(verify_key: &[u8; 32], encrypt_key: &[u8; 32]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(FINGERPRINT_DOMAIN);
    hasher.update(verify_key);
    hasher.update(encrypt_key);
    hex::encode(hasher.finalize())
}
