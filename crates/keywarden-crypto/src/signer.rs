// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item signatures.
//!
//! Three detached Ed25519 signatures are produced per item:
//!
//! - the user's address key over the plaintext content (authorship),
//! - the item key over the vault key packet (binds the item to one
//!   vault-key rotation, preventing cross-rotation replay),
//! - the item key over the plaintext content (integrity independent of
//!   transport).
//!
//! The two content signatures are encrypted under the session key, so
//! only holders of the vault's private key can learn which user authored
//! an item while tamper detection still works after decryption.

use ed25519_dalek::{Signature, Signer as _, VerifyingKey};
use keywarden_core::KeywardenError;

use crate::cipher::{self, SessionKey};
use crate::key_material::PrivateKeyMaterial;

/// The signature set attached to an outbound item.
pub struct ItemSignatures {
    /// User address signature over the content, session-key encrypted.
    pub encrypted_user_signature: Vec<u8>,
    /// Item key signature over the content, session-key encrypted.
    pub encrypted_item_signature: Vec<u8>,
    /// Item key signature over the vault key packet, in the clear.
    pub vault_key_packet_signature: Vec<u8>,
}

/// Sign serialized item content with the user's address key and the item
/// key, encrypting the content signatures under the session key.
pub fn sign_item(
    serialized_content: &[u8],
    user_key: &PrivateKeyMaterial,
    item_key: &PrivateKeyMaterial,
    vault_key_packet: &[u8],
    session_key: &SessionKey,
) -> Result<ItemSignatures, KeywardenError> {
    let user_signature = user_key.signing_key().sign(serialized_content);
    let item_signature = item_key.signing_key().sign(serialized_content);
    let key_packet_signature = item_key.signing_key().sign(vault_key_packet);

    let encrypted_user_signature =
        cipher::seal_with_session_key(session_key, &user_signature.to_bytes())?;
    let encrypted_item_signature =
        cipher::seal_with_session_key(session_key, &item_signature.to_bytes())?;

    Ok(ItemSignatures {
        encrypted_user_signature,
        encrypted_item_signature,
        vault_key_packet_signature: key_packet_signature.to_bytes().to_vec(),
    })
}

/// Verify a decrypted detached signature over content bytes.
pub fn verify_content_signature(
    verify_key: &VerifyingKey,
    content: &[u8],
    signature_bytes: &[u8],
) -> Result<(), KeywardenError> {
    let signature_array: [u8; 64] = signature_bytes.try_into().map_err(|_| {
        KeywardenError::ItemSignatureMismatch("signature has unexpected length".to_string())
    })?;
    let signature = Signature::from_bytes(&signature_array);
    verify_key
        .verify_strict(content, &signature)
        .map_err(|_| {
            KeywardenError::ItemSignatureMismatch(
                "signature does not match content".to_string(),
            )
        })
}
