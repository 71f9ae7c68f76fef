// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keywarden crypto core.
//!
//! Every variant is terminal for the call that raised it: nothing is
//! retried internally, and key-ring assembly is all-or-nothing. "Key has
//! no passphrase" and "vault has no keys yet" are modeled as `None` /
//! empty collections by the callers, never as errors.

use thiserror::Error;

use crate::types::RotationId;

/// The primary error type used across all Keywarden crypto operations.
#[derive(Debug, Error)]
pub enum KeywardenError {
    /// Key blob could not be parsed (bad armor, bad wire encoding, bad version).
    #[error("malformed key material: {0}")]
    MalformedKey(String),

    /// The supplied passphrase does not unlock the key's private half.
    #[error("wrong passphrase for private key material")]
    WrongPassphrase,

    /// A key's detached signature did not verify against the signing key.
    #[error("key signature mismatch [rotation_id={rotation_id}]")]
    KeySignatureMismatch { rotation_id: RotationId },

    /// An item key references a rotation with no vault key in the same response.
    #[error("no vault key found for item key [rotation_id={rotation_id}]")]
    OrphanedItemKey { rotation_id: RotationId },

    /// Decoded item content carries a discriminant with no handling rule.
    #[error("unknown content type discriminant: {0}")]
    UnknownContentType(u32),

    /// An alias item was decoded without the externally joined alias email.
    ///
    /// The alias address is never embedded in the encrypted payload, so
    /// absence of the joined value is a programming-contract violation on
    /// the caller's side, not a recoverable condition.
    #[error("alias item decoded without an alias email")]
    MissingAliasEmail,

    /// Ciphertext could not be decrypted (wrong key, tampered or truncated packet).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Plaintext could not be encrypted.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// A wire buffer (item content, item state) failed to decode.
    #[error("malformed content: {0}")]
    MalformedContent(String),

    /// The operation needs private key material this device does not hold.
    #[error("key has no private material available on this device")]
    PrivateKeyUnavailable,

    /// An item revision references a rotation the key ring does not contain.
    #[error("no key material for rotation [rotation_id={rotation_id}]")]
    UnknownKeyRotation { rotation_id: RotationId },

    /// A decrypted item signature did not verify against the expected key.
    #[error("item signature mismatch: {0}")]
    ItemSignatureMismatch(String),

    /// Configuration errors (invalid TOML, out-of-range KDF parameters).
    #[error("configuration error: {0}")]
    Config(String),
}
