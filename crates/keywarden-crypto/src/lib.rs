// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault-key and item-encryption core for the Keywarden password manager.
//!
//! Manages hierarchical key material (signing keys, vault keys, item
//! keys), assembles per-session key rings from signed server key lists,
//! and encrypts, signs, decrypts, and verifies structured secret items.
//!
//! The core is logically synchronous and stateless between calls: each
//! operation is a pure function over its inputs plus one explicitly
//! passed [`CryptoEngine`] handle. The only cross-call state is the
//! [`VaultItemKeyList`] produced by [`open_keys`], which is read-only
//! after construction and safe to share across threads. Callers needing
//! cancellation race these calls against an external timeout; nothing is
//! retried internally.

pub mod armor;
pub mod cipher;
pub mod content;
pub mod create_item;
pub mod engine;
pub mod kdf;
pub mod key_material;
pub mod keyring;
pub mod keystore;
pub mod open_item;
pub mod open_keys;
pub mod passphrase;
pub mod primitives;
pub mod sealed;
pub mod signer;
pub mod verify;

// Re-export the operation surface at crate root for ergonomic imports.
pub use cipher::{
    decrypt_detached, decrypt_session_key, encrypt_detached, EncryptedPackets, SessionKey,
};
pub use content::CONTENT_FORMAT_VERSION;
pub use create_item::{create_item, CreateItemRequest};
pub use engine::CryptoEngine;
pub use key_material::{
    fingerprint, generate_locked_key, read_key, strip_private, KeyMaterial, PrivateKeyMaterial,
    PublicKeyMaterial,
};
pub use keyring::{
    AddressKey, ItemKey, SigningKey, UserAddress, VaultItemKeyList, VaultKey,
};
pub use keystore::KeystoreCrypto;
pub use open_item::{open_item, ItemRevision};
pub use open_keys::{
    open_keys, ItemKeyResponse, VaultItemKeyListResponse, VaultKeyResponse,
};
pub use passphrase::{open_item_passphrase, open_vault_passphrase, seal_passphrase};
pub use signer::{sign_item, ItemSignatures};
pub use verify::{sign_key_fingerprint, verify_key_signature};
