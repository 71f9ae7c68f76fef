// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key certification: signing and verifying key fingerprints.
//!
//! The signed payload is the UTF-8 bytes of the key's long-form
//! fingerprint. Verification is strict-mode Ed25519 at current time; any
//! mismatch -- including unparseable inputs -- yields `false`, never an
//! error. `open_keys` turns a `false` into `KeySignatureMismatch` for the
//! offending rotation.

use ed25519_dalek::{Signature, Signer as _};
use keywarden_core::KeywardenError;

use crate::armor;
use crate::key_material::{self, PrivateKeyMaterial, PublicKeyMaterial};

/// Verify a key blob's detached signature against the signing key.
pub fn verify_key_signature(
    signing_key: &PublicKeyMaterial,
    armored_key: &str,
    signature_b64: &str,
) -> bool {
    let Ok(fingerprint) = key_material::fingerprint(armored_key) else {
        return false;
    };
    let Ok(signature_bytes) = armor::decode(signature_b64) else {
        return false;
    };
    let Ok(signature_array) = <[u8; 64]>::try_from(signature_bytes.as_slice()) else {
        return false;
    };
    let signature = Signature::from_bytes(&signature_array);

    signing_key
        .verify_key()
        .verify_strict(fingerprint.as_bytes(), &signature)
        .is_ok()
}

/// Sign a key blob's fingerprint with an identity key.
///
/// Produces the detached base64 signature distributed alongside new key
/// rotations.
pub fn sign_key_fingerprint(
    signing_key: &PrivateKeyMaterial,
    armored_key: &str,
) -> Result<String, KeywardenError> {
    let fingerprint = key_material::fingerprint(armored_key)?;
    let signature = signing_key.signing_key().sign(fingerprint.as_bytes());
    Ok(armor::encode(&signature.to_bytes()))
}
