// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Keywarden password-manager crypto stack.
//!
//! This crate provides the error taxonomy, domain types, and secret byte
//! holders shared by the Keywarden workspace. The actual cryptographic
//! operations live in `keywarden-crypto`.

pub mod error;
pub mod secret;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KeywardenError;
pub use secret::{EncryptedByteArray, PlainByteArray};
pub use types::{
    Item, ItemContents, ItemId, ItemState, ItemType, PackageInfo, RotationId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_rotation_ids() {
        let err = KeywardenError::KeySignatureMismatch {
            rotation_id: RotationId::from("r42"),
        };
        assert!(err.to_string().contains("r42"));

        let err = KeywardenError::OrphanedItemKey {
            rotation_id: RotationId::from("r3"),
        };
        assert!(err.to_string().contains("r3"));
    }

    #[test]
    fn error_variants_construct() {
        let _malformed = KeywardenError::MalformedKey("truncated".into());
        let _passphrase = KeywardenError::WrongPassphrase;
        let _content = KeywardenError::UnknownContentType(99);
        let _alias = KeywardenError::MissingAliasEmail;
        let _decrypt = KeywardenError::Decryption("bad packet".into());
        let _encrypt = KeywardenError::Encryption("aead failure".into());
        let _unavailable = KeywardenError::PrivateKeyUnavailable;
        let _config = KeywardenError::Config("bad kdf params".into());
    }
}
