// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key ring assembly from a server key-list response.
//!
//! All-or-nothing: any per-key failure discards everything constructed so
//! far for the call. No partial ring is ever surfaced.

use keywarden_core::{KeywardenError, RotationId};
use serde::Deserialize;
use tracing::debug;

use crate::engine::CryptoEngine;
use crate::key_material::read_key;
use crate::keyring::{ItemKey, SigningKey, UserAddress, VaultItemKeyList, VaultKey};
use crate::passphrase::{open_item_passphrase, open_vault_passphrase};
use crate::verify::verify_key_signature;

/// One vault key entry of a key-list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultKeyResponse {
    pub rotation_id: RotationId,
    pub rotation: i64,
    /// Armored key blob.
    pub key: String,
    /// Detached base64 signature over the key's fingerprint.
    pub key_signature: String,
    /// Base64 sealed passphrase; absent when this device has no private
    /// access.
    pub key_passphrase: Option<String>,
}

/// One item key entry of a key-list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKeyResponse {
    pub rotation_id: RotationId,
    pub key: String,
    pub key_signature: String,
    pub key_passphrase: Option<String>,
}

/// The raw key-list response supplied by the networking layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItemKeyListResponse {
    #[serde(default)]
    pub vault_keys: Vec<VaultKeyResponse>,
    #[serde(default)]
    pub item_keys: Vec<ItemKeyResponse>,
}

/// Assemble a key ring from a key-list response.
///
/// Every key's signature is verified against `signing_key` before use;
/// vault key passphrases are opened with the user's address keys, item
/// key passphrases with the matching vault key. The vault key with the
/// maximum rotation is marked primary, along with the item key of the
/// same rotation.
pub fn open_keys(
    engine: &CryptoEngine,
    keys: &VaultItemKeyListResponse,
    signing_key: &SigningKey,
    user_address: &UserAddress,
) -> Result<VaultItemKeyList, KeywardenError> {
    let max_rotation_id = keys
        .vault_keys
        .iter()
        .max_by_key(|k| k.rotation)
        .map(|k| k.rotation_id.clone())
        .unwrap_or_else(|| RotationId(String::new()));
    let signing_public = signing_key.public();

    let mut vault_keys = Vec::with_capacity(keys.vault_keys.len());
    for entry in &keys.vault_keys {
        if !verify_key_signature(signing_public, &entry.key, &entry.key_signature) {
            return Err(KeywardenError::KeySignatureMismatch {
                rotation_id: entry.rotation_id.clone(),
            });
        }
        let encrypted_passphrase =
            open_vault_passphrase(engine, entry.key_passphrase.as_deref(), user_address)?;
        let is_primary = entry.rotation_id == max_rotation_id;
        let key = read_entry_key(engine, &entry.key, is_primary, encrypted_passphrase.as_ref())?;
        vault_keys.push(VaultKey {
            rotation_id: entry.rotation_id.clone(),
            rotation: entry.rotation,
            key,
            encrypted_passphrase,
        });
    }

    let mut item_keys = Vec::with_capacity(keys.item_keys.len());
    for entry in &keys.item_keys {
        if !verify_key_signature(signing_public, &entry.key, &entry.key_signature) {
            return Err(KeywardenError::KeySignatureMismatch {
                rotation_id: entry.rotation_id.clone(),
            });
        }
        let vault_key = vault_keys
            .iter()
            .find(|v| v.rotation_id == entry.rotation_id)
            .ok_or_else(|| KeywardenError::OrphanedItemKey {
                rotation_id: entry.rotation_id.clone(),
            })?;
        let encrypted_passphrase =
            open_item_passphrase(engine, entry.key_passphrase.as_deref(), vault_key)?;
        let is_primary = entry.rotation_id == max_rotation_id;
        let key = read_entry_key(engine, &entry.key, is_primary, encrypted_passphrase.as_ref())?;
        item_keys.push(ItemKey {
            rotation_id: entry.rotation_id.clone(),
            key,
            encrypted_passphrase,
        });
    }

    debug!(
        vault_keys = vault_keys.len(),
        item_keys = item_keys.len(),
        primary = %max_rotation_id,
        "key ring opened"
    );
    Ok(VaultItemKeyList {
        vault_keys,
        item_keys,
    })
}

/// Read an entry's key blob, validating the just-opened passphrase
/// against the private half.
fn read_entry_key(
    engine: &CryptoEngine,
    armored: &str,
    is_primary: bool,
    encrypted_passphrase: Option<&keywarden_core::EncryptedByteArray>,
) -> Result<crate::key_material::KeyMaterial, KeywardenError> {
    match encrypted_passphrase {
        Some(encrypted) => {
            let passphrase = engine.keystore().decrypt(encrypted)?;
            read_key(armored, is_primary, Some(&passphrase))
        }
        None => read_key(armored, is_primary, None),
    }
}
