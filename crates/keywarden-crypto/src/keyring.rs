// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain key types and the per-session key ring.
//!
//! A [`VaultItemKeyList`] is produced atomically by one `open_keys` call
//! and never mutated afterwards; rotation updates produce a new ring.
//! Reads need no locking.

use keywarden_core::{EncryptedByteArray, KeywardenError, RotationId};

use crate::engine::CryptoEngine;
use crate::key_material::{KeyMaterial, PrivateKeyMaterial, PublicKeyMaterial};

/// An identity key trusted to certify vault and item keys.
///
/// Verification only; the crypto core never signs with it.
#[derive(Debug, Clone)]
pub struct SigningKey {
    key: KeyMaterial,
}

impl SigningKey {
    pub fn new(key: KeyMaterial) -> Self {
        Self { key }
    }

    pub fn public(&self) -> &PublicKeyMaterial {
        self.key.public()
    }
}

/// One key of the user's address key set.
#[derive(Debug, Clone)]
pub struct AddressKey {
    pub key: KeyMaterial,
    /// Keystore-encrypted passphrase; `None` when this device has no
    /// private access to the key.
    pub encrypted_passphrase: Option<EncryptedByteArray>,
}

impl AddressKey {
    /// Unlock this key's private half, if this device can.
    ///
    /// Returns `Ok(None)` when the key has no passphrase or no private
    /// half here -- a valid state, not an error.
    pub fn unlock(
        &self,
        engine: &CryptoEngine,
    ) -> Result<Option<PrivateKeyMaterial>, KeywardenError> {
        let Some(encrypted) = &self.encrypted_passphrase else {
            return Ok(None);
        };
        if !self.key.has_private_access() {
            return Ok(None);
        }
        let passphrase = engine.keystore().decrypt(encrypted)?;
        self.key.unlock_private(&passphrase).map(Some)
    }
}

/// The user's address key set, managed by an external key-management
/// layer and borrowed here for passphrase decryption and signing.
#[derive(Debug, Clone)]
pub struct UserAddress {
    pub keys: Vec<AddressKey>,
}

impl UserAddress {
    pub fn new(keys: Vec<AddressKey>) -> Self {
        Self { keys }
    }

    /// Run `f` with the first address key this device can unlock,
    /// preferring the primary key.
    pub fn with_private_key<R>(
        &self,
        engine: &CryptoEngine,
        f: impl FnOnce(&PrivateKeyMaterial) -> Result<R, KeywardenError>,
    ) -> Result<R, KeywardenError> {
        let mut ordered: Vec<&AddressKey> = self.keys.iter().collect();
        ordered.sort_by_key(|k| !k.key.is_primary());
        for address_key in ordered {
            if let Some(private) = address_key.unlock(engine)? {
                return f(&private);
            }
        }
        Err(KeywardenError::PrivateKeyUnavailable)
    }
}

/// One rotation epoch of a shared vault's encryption key.
#[derive(Debug, Clone)]
pub struct VaultKey {
    pub rotation_id: RotationId,
    /// Monotonic epoch number; the maximum marks the primary key.
    pub rotation: i64,
    pub key: KeyMaterial,
    pub encrypted_passphrase: Option<EncryptedByteArray>,
}

impl VaultKey {
    pub fn is_primary(&self) -> bool {
        self.key.is_primary()
    }

    /// Run `f` with the unlocked private half, scoped so the plaintext
    /// passphrase and secret keys die before this returns.
    pub fn with_private_key<R>(
        &self,
        engine: &CryptoEngine,
        f: impl FnOnce(&PrivateKeyMaterial) -> Result<R, KeywardenError>,
    ) -> Result<R, KeywardenError> {
        with_unlocked(&self.key, self.encrypted_passphrase.as_ref(), engine, f)
    }
}

/// A per-item key bound to one vault-key rotation.
#[derive(Debug, Clone)]
pub struct ItemKey {
    pub rotation_id: RotationId,
    pub key: KeyMaterial,
    pub encrypted_passphrase: Option<EncryptedByteArray>,
}

impl ItemKey {
    pub fn is_primary(&self) -> bool {
        self.key.is_primary()
    }

    pub fn with_private_key<R>(
        &self,
        engine: &CryptoEngine,
        f: impl FnOnce(&PrivateKeyMaterial) -> Result<R, KeywardenError>,
    ) -> Result<R, KeywardenError> {
        with_unlocked(&self.key, self.encrypted_passphrase.as_ref(), engine, f)
    }
}

fn with_unlocked<R>(
    key: &KeyMaterial,
    encrypted_passphrase: Option<&EncryptedByteArray>,
    engine: &CryptoEngine,
    f: impl FnOnce(&PrivateKeyMaterial) -> Result<R, KeywardenError>,
) -> Result<R, KeywardenError> {
    let encrypted = encrypted_passphrase.ok_or(KeywardenError::PrivateKeyUnavailable)?;
    let passphrase = engine.keystore().decrypt(encrypted)?;
    let private = key.unlock_private(&passphrase)?;
    f(&private)
}

/// The key ring produced atomically by one `open_keys` call.
#[derive(Debug, Clone, Default)]
pub struct VaultItemKeyList {
    pub vault_keys: Vec<VaultKey>,
    pub item_keys: Vec<ItemKey>,
}

impl VaultItemKeyList {
    pub fn is_empty(&self) -> bool {
        self.vault_keys.is_empty() && self.item_keys.is_empty()
    }

    /// The vault key of the most recent rotation.
    pub fn primary_vault_key(&self) -> Option<&VaultKey> {
        self.vault_keys.iter().find(|k| k.is_primary())
    }

    /// The item key of the most recent rotation.
    pub fn primary_item_key(&self) -> Option<&ItemKey> {
        self.item_keys.iter().find(|k| k.is_primary())
    }

    pub fn vault_key(&self, rotation_id: &RotationId) -> Option<&VaultKey> {
        self.vault_keys.iter().find(|k| &k.rotation_id == rotation_id)
    }

    pub fn item_key(&self, rotation_id: &RotationId) -> Option<&ItemKey> {
        self.item_keys.iter().find(|k| &k.rotation_id == rotation_id)
    }
}
