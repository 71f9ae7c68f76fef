// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-recipient public-key encryption over X25519.
//!
//! An ephemeral X25519 keypair is generated per message; the ephemeral
//! shared secret is expanded into an AES-256-GCM wrapping key via
//! HKDF-SHA256 with a domain label covering both public values. Output
//! layout: `eph_pk(32) || nonce(12) || ciphertext || tag`.
//!
//! Key passphrases use the [`PASSPHRASE_DOMAIN`]; detached item key
//! packets use their own domain so a passphrase message can never be
//! replayed as a key packet.

use keywarden_core::{KeywardenError, PlainByteArray};
use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey as X25519PublicKey, StaticSecret};

use crate::primitives;

/// Domain label for sealed key passphrases.
pub(crate) const PASSPHRASE_DOMAIN: &[u8] = b"keywarden-passphrase-v1";

const X25519_PK_LEN: usize = 32;

/// Encrypt `plaintext` to `recipient` under `domain`.
pub(crate) fn seal_with_domain(
    recipient: &X25519PublicKey,
    plaintext: &[u8],
    domain: &[u8],
) -> Result<Vec<u8>, KeywardenError> {
    let eph_secret = EphemeralSecret::random_from_rng(OsRng);
    let eph_public = X25519PublicKey::from(&eph_secret);
    let shared = eph_secret.diffie_hellman(recipient);

    let wrapping_key = wrapping_key_for(
        shared.as_bytes(),
        eph_public.as_bytes(),
        recipient.as_bytes(),
        domain,
    )?;
    let blob = primitives::seal(&wrapping_key, plaintext)?;

    let mut out = Vec::with_capacity(X25519_PK_LEN + blob.len());
    out.extend_from_slice(eph_public.as_bytes());
    out.extend_from_slice(&blob);
    Ok(out)
}

/// Decrypt a sealed message with the recipient's private key.
pub(crate) fn open_with_domain(
    recipient_secret: &StaticSecret,
    sealed: &[u8],
    domain: &[u8],
) -> Result<PlainByteArray, KeywardenError> {
    if sealed.len() < X25519_PK_LEN + primitives::NONCE_LEN + primitives::TAG_LEN {
        return Err(KeywardenError::Decryption(
            "truncated sealed message".to_string(),
        ));
    }
    let (eph_bytes, blob) = sealed.split_at(X25519_PK_LEN);
    let eph_array: [u8; 32] = eph_bytes
        .try_into()
        .map_err(|_| KeywardenError::Decryption("invalid ephemeral public key".to_string()))?;
    let eph_public = X25519PublicKey::from(eph_array);

    let shared = recipient_secret.diffie_hellman(&eph_public);
    let recipient_public = X25519PublicKey::from(recipient_secret);
    let wrapping_key = wrapping_key_for(
        shared.as_bytes(),
        eph_public.as_bytes(),
        recipient_public.as_bytes(),
        domain,
    )?;

    primitives::open(&wrapping_key, blob).map(PlainByteArray::new)
}

/// Seal a plaintext to the recipient using the passphrase domain.
pub fn seal_to(
    recipient: &X25519PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, KeywardenError> {
    seal_with_domain(recipient, plaintext, PASSPHRASE_DOMAIN)
}

/// Open a passphrase-domain sealed message.
pub fn open_from(
    recipient_secret: &StaticSecret,
    sealed: &[u8],
) -> Result<PlainByteArray, KeywardenError> {
    open_with_domain(recipient_secret, sealed, PASSPHRASE_DOMAIN)
}

fn wrapping_key_for(
    shared_secret: &[u8],
    eph_public: &[u8; 32],
    recipient_public: &[u8; 32],
    domain: &[u8],
) -> Result<zeroize::Zeroizing<[u8; 32]>, KeywardenError> {
    let mut info = Vec::with_capacity(domain.len() + 64);
    info.extend_from_slice(domain);
    info.extend_from_slice(eph_public);
    info.extend_from_slice(recipient_public);
    primitives::expand_wrapping_key(shared_secret, &info)
}
