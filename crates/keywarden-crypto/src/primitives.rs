// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations and key expansion.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the
//! system CSPRNG and prepends it to the returned blob. Nonce reuse would
//! be catastrophic for GCM security.

use hkdf::Hkdf;
use keywarden_core::KeywardenError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use zeroize::Zeroizing;

/// AES-256-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt plaintext with AES-256-GCM using a random 96-bit nonce.
///
/// Returns a single blob laid out as `nonce || ciphertext || tag`.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, KeywardenError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| KeywardenError::Encryption("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    // Generate random 96-bit nonce.
    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| KeywardenError::Encryption("failed to generate random nonce".to_string()))?;

    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: plaintext buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| KeywardenError::Encryption("AES-256-GCM encryption failed".to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + in_out.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&in_out);
    Ok(blob)
}

/// Decrypt a `nonce || ciphertext || tag` blob produced by [`seal`].
///
/// Returns the decrypted plaintext, or a `Decryption` error if the key is
/// wrong or the blob is tampered or truncated.
pub fn open(key: &[u8; 32], blob: &[u8]) -> Result<Vec<u8>, KeywardenError> {
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(KeywardenError::Decryption(
            "truncated ciphertext blob".to_string(),
        ));
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);

    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| KeywardenError::Decryption("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
        .map_err(|_| KeywardenError::Decryption("invalid nonce".to_string()))?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            KeywardenError::Decryption(
                "AES-256-GCM decryption failed -- wrong key or corrupted data".to_string(),
            )
        })?;

    Ok(plaintext.to_vec())
}

/// Generate a random 32-byte key suitable for AES-256-GCM.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory
/// zeroing on drop.
pub fn generate_key() -> Result<Zeroizing<[u8; 32]>, KeywardenError> {
    let rng = SystemRandom::new();
    let mut key = Zeroizing::new([0u8; 32]);
    rng.fill(key.as_mut())
        .map_err(|_| KeywardenError::Encryption("failed to generate random key".to_string()))?;
    Ok(key)
}

/// Expand a Diffie-Hellman shared secret into an AEAD wrapping key via
/// HKDF-SHA256.
///
/// `info` carries the domain-separation label plus the transcript of
/// public values; distinct domains produce independent keys from the
/// same shared secret.
pub fn expand_wrapping_key(
    shared_secret: &[u8],
    info: &[u8],
) -> Result<Zeroizing<[u8; 32]>, KeywardenError> {
    let hkdf = Hkdf::<Sha256>::new(None, shared_secret);
    let mut output = Zeroizing::new([0u8; 32]);
    hkdf.expand(info, output.as_mut())
        .map_err(|_| KeywardenError::Encryption("HKDF-SHA256 expansion failed".to_string()))?;
    Ok(output)
}
