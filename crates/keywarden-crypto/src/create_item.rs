// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The create-item operation.
//!
//! Serializes item contents, encrypts them to the vault key as detached
//! packets, signs with the user's address key and the item key, and
//! assembles the wire request the networking layer ships to the
//! item-creation endpoint.

use keywarden_core::{ItemContents, KeywardenError, RotationId};
use serde::Serialize;
use tracing::debug;

use crate::armor;
use crate::cipher;
use crate::content;
use crate::engine::CryptoEngine;
use crate::keyring::{ItemKey, UserAddress, VaultKey};
use crate::signer;

/// The literal wire payload for the remote item-creation endpoint.
///
/// All packet and signature fields are base64.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub rotation_id: RotationId,
    pub content_format_version: u16,
    pub vault_key_packet: String,
    pub vault_key_packet_signature: String,
    pub user_signature: String,
    pub item_key_signature: String,
    pub content: String,
}

/// Encrypt and sign new item contents for the given vault-key rotation.
pub fn create_item(
    engine: &CryptoEngine,
    vault_key: &VaultKey,
    item_key: &ItemKey,
    user_address: &UserAddress,
    contents: &ItemContents,
    app_context: &str,
) -> Result<CreateItemRequest, KeywardenError> {
    let serialized = content::serialize(contents, app_context)?;
    let max_size = engine.content().max_content_size;
    if serialized.len() > max_size {
        return Err(KeywardenError::MalformedContent(format!(
            "serialized content is {} bytes, exceeding the {max_size} byte limit",
            serialized.len()
        )));
    }

    let packets = cipher::encrypt_detached(vault_key.key.public(), &serialized)?;

    // The session key is pulled back out of the key packet immediately
    // and dies with this call; it is never persisted.
    let session_key = vault_key.with_private_key(engine, |private| {
        cipher::decrypt_session_key(private, &packets.key_packet)
    })?;

    let signatures = user_address.with_private_key(engine, |user_private| {
        item_key.with_private_key(engine, |item_private| {
            signer::sign_item(
                &serialized,
                user_private,
                item_private,
                &packets.key_packet,
                &session_key,
            )
        })
    })?;

    debug!(
        rotation_id = %vault_key.rotation_id,
        item_type = %contents.item_type(),
        "item encrypted and signed"
    );

    Ok(CreateItemRequest {
        rotation_id: vault_key.rotation_id.clone(),
        content_format_version: content::CONTENT_FORMAT_VERSION,
        vault_key_packet: armor::encode(&packets.key_packet),
        vault_key_packet_signature: armor::encode(&signatures.vault_key_packet_signature),
        user_signature: armor::encode(&signatures.encrypted_user_signature),
        item_key_signature: armor::encode(&signatures.encrypted_item_signature),
        content: armor::encode(&packets.content_packet),
    })
}
