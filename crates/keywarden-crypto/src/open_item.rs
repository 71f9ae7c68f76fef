// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The open-item operation.
//!
//! Decrypts a stored item revision with the matching vault key, verifies
//! the decrypted signatures, reconstructs the content discriminant, and
//! hands back an [`Item`] whose title/note/content are re-encrypted
//! under the device keystore.

use std::collections::BTreeSet;

use keywarden_core::{
    Item, ItemContents, ItemId, ItemState, KeywardenError, PackageInfo, PlainByteArray,
    RotationId,
};
use serde::Deserialize;
use tracing::debug;

use crate::armor;
use crate::cipher;
use crate::content;
use crate::engine::CryptoEngine;
use crate::key_material::PublicKeyMaterial;
use crate::keyring::VaultItemKeyList;
use crate::signer;

/// A stored item revision as supplied by the repository/networking layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRevision {
    pub item_id: ItemId,
    pub rotation_id: RotationId,
    pub revision: i64,
    pub content_format_version: u16,
    /// Base64 key packet of the detached encryption.
    pub key_packet: String,
    /// Base64 content packet.
    pub content: String,
    /// Base64 session-key-encrypted user signature, when stored.
    pub user_signature: Option<String>,
    /// Base64 session-key-encrypted item key signature, when stored.
    pub item_key_signature: Option<String>,
    pub state: i64,
    /// Joined from the separate alias record for alias items.
    pub alias_email: Option<String>,
    pub create_time: i64,
    pub modify_time: i64,
    #[serde(default)]
    pub package_info_set: BTreeSet<PackageInfo>,
}

/// Decrypt an item revision using the session's key ring.
///
/// The item key signature is always verified when present (the item key
/// travels in the ring). The user signature is verified only when the
/// caller supplies the author's address verifying key, since address
/// books belong to an external layer.
pub fn open_item(
    engine: &CryptoEngine,
    revision: &ItemRevision,
    keyring: &VaultItemKeyList,
    author_key: Option<&PublicKeyMaterial>,
) -> Result<(Item, ItemContents), KeywardenError> {
    if revision.content_format_version != content::CONTENT_FORMAT_VERSION {
        return Err(KeywardenError::MalformedContent(format!(
            "unsupported content format version {}",
            revision.content_format_version
        )));
    }

    let vault_key = keyring.vault_key(&revision.rotation_id).ok_or_else(|| {
        KeywardenError::UnknownKeyRotation {
            rotation_id: revision.rotation_id.clone(),
        }
    })?;

    let key_packet = decode_packet(&revision.key_packet)?;
    let content_packet = decode_packet(&revision.content)?;

    let (serialized, session_key) = vault_key.with_private_key(engine, |private| {
        let session_key = cipher::decrypt_session_key(private, &key_packet)?;
        let serialized = cipher::open_with_session_key(&session_key, &content_packet)?;
        Ok((serialized, session_key))
    })?;

    if let Some(signature_b64) = &revision.item_key_signature {
        let item_key = keyring.item_key(&revision.rotation_id).ok_or_else(|| {
            KeywardenError::UnknownKeyRotation {
                rotation_id: revision.rotation_id.clone(),
            }
        })?;
        let signature = decrypt_signature(&session_key, signature_b64)?;
        signer::verify_content_signature(
            item_key.key.public().verify_key(),
            serialized.as_slice(),
            signature.as_slice(),
        )?;
    }
    if let Some(author) = author_key {
        if let Some(signature_b64) = &revision.user_signature {
            let signature = decrypt_signature(&session_key, signature_b64)?;
            signer::verify_content_signature(
                author.verify_key(),
                serialized.as_slice(),
                signature.as_slice(),
            )?;
        }
    }

    let (contents, item_type) =
        content::deserialize(serialized.as_slice(), revision.alias_email.as_deref())?;

    // Re-encrypt for local-only storage; the plaintext buffers die here.
    let keystore = engine.keystore();
    let title = keystore.encrypt(&PlainByteArray::new(contents.title().as_bytes().to_vec()))?;
    let note = keystore.encrypt(&PlainByteArray::new(contents.note().as_bytes().to_vec()))?;
    let encrypted_content = keystore.encrypt(&serialized)?;

    let item = Item {
        id: revision.item_id.clone(),
        revision: revision.revision,
        item_type,
        title,
        note,
        content: encrypted_content,
        state: ItemState::try_from(revision.state)?,
        create_time: revision.create_time,
        modify_time: revision.modify_time,
        package_info_set: revision.package_info_set.clone(),
    };

    debug!(
        item_id = %revision.item_id.0,
        item_type = %item_type,
        revision = revision.revision,
        "item opened"
    );
    Ok((item, contents))
}

fn decode_packet(armored: &str) -> Result<Vec<u8>, KeywardenError> {
    armor::decode(armored)
        .map_err(|e| KeywardenError::Decryption(format!("invalid packet encoding: {e}")))
}

fn decrypt_signature(
    session_key: &cipher::SessionKey,
    signature_b64: &str,
) -> Result<PlainByteArray, KeywardenError> {
    let encrypted = armor::decode(signature_b64)
        .map_err(|e| KeywardenError::Decryption(format!("invalid signature encoding: {e}")))?;
    cipher::open_with_session_key(session_key, &encrypted)
}
