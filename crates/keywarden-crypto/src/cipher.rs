// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detached-packet item encryption.
//!
//! Encrypting to a vault key produces two packets: the content packet
//! (payload under a fresh session key) and the key packet (session key
//! sealed to the vault's encryption key). They are stored and shipped
//! separately; the key packet is independently needed to recover the
//! session key for signature encryption.
//!
//! The session key lives only inside the request scope that derived it
//! and is never persisted.

use keywarden_core::{KeywardenError, PlainByteArray};
use zeroize::Zeroizing;

use crate::key_material::{PrivateKeyMaterial, PublicKeyMaterial};
use crate::{primitives, sealed};

/// Domain label for key packets; distinct from the passphrase domain so
/// the two message kinds can never be replayed across contexts.
const KEY_PACKET_DOMAIN: &[u8] = b"keywarden-keypacket-v1";

/// Symmetric key recovered from a key packet.
///
/// Debug output intentionally omits the key.
pub struct SessionKey(Zeroizing<[u8; 32]>);

impl SessionKey {
    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey([REDACTED])")
    }
}

/// The two detachable halves of an item encryption.
#[derive(Debug, Clone)]
pub struct EncryptedPackets {
    /// Session key sealed to the recipient's encryption key.
    pub key_packet: Vec<u8>,
    /// Payload under the session key.
    pub content_packet: Vec<u8>,
}

/// Encrypt a serialized payload to a vault key, producing detached
/// packets.
pub fn encrypt_detached(
    recipient: &PublicKeyMaterial,
    plaintext: &[u8],
) -> Result<EncryptedPackets, KeywardenError> {
    let session_key = primitives::generate_key()?;
    let content_packet = primitives::seal(&session_key, plaintext)?;
    let key_packet = sealed::seal_with_domain(
        recipient.encrypt_key(),
        &session_key[..],
        KEY_PACKET_DOMAIN,
    )?;
    Ok(EncryptedPackets {
        key_packet,
        content_packet,
    })
}

/// Recover the session key from a key packet with the vault's private
/// key.
pub fn decrypt_session_key(
    private: &PrivateKeyMaterial,
    key_packet: &[u8],
) -> Result<SessionKey, KeywardenError> {
    let plaintext = sealed::open_with_domain(private.decrypt_key(), key_packet, KEY_PACKET_DOMAIN)?;
    let key: [u8; 32] = plaintext
        .as_slice()
        .try_into()
        .map_err(|_| KeywardenError::Decryption("session key is not 32 bytes".to_string()))?;
    Ok(SessionKey(Zeroizing::new(key)))
}

/// Decrypt a detached-packet encryption with the vault's private key.
pub fn decrypt_detached(
    private: &PrivateKeyMaterial,
    content_packet: &[u8],
    key_packet: &[u8],
) -> Result<PlainByteArray, KeywardenError> {
    let session_key = decrypt_session_key(private, key_packet)?;
    open_with_session_key(&session_key, content_packet)
}

/// Symmetrically encrypt under an already-recovered session key.
///
/// Used to hide item signatures from anyone without the vault's private
/// key.
pub fn seal_with_session_key(
    session_key: &SessionKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, KeywardenError> {
    primitives::seal(session_key.as_bytes(), plaintext)
}

/// Symmetrically decrypt under a recovered session key.
pub fn open_with_session_key(
    session_key: &SessionKey,
    blob: &[u8],
) -> Result<PlainByteArray, KeywardenError> {
    primitives::open(session_key.as_bytes(), blob).map(PlainByteArray::new)
}
