// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for signed key-list responses and item revisions.
//!
//! [`TestVault`] plays the server and key-management layer: it owns a
//! signing key and one user address key, mints vault/item key rotations
//! with properly sealed passphrases and fingerprint signatures, and
//! assembles the response objects `open_keys` consumes.

use keywarden_config::KdfConfig;
use keywarden_core::PlainByteArray;
use keywarden_crypto::{
    generate_locked_key, read_key, seal_passphrase, sign_key_fingerprint, AddressKey,
    CreateItemRequest, CryptoEngine, ItemKeyResponse, ItemRevision, PrivateKeyMaterial,
    PublicKeyMaterial, SigningKey, UserAddress, VaultItemKeyListResponse, VaultKeyResponse,
    CONTENT_FORMAT_VERSION,
};

/// Low-cost Argon2id parameters so test suites stay fast.
pub fn fast_kdf() -> KdfConfig {
    KdfConfig {
        memory_cost: 32768,
        iterations: 2,
        parallelism: 1,
    }
}

/// A self-contained test universe: engine, signing key, user address,
/// and a growing key-list response.
pub struct TestVault {
    pub engine: CryptoEngine,
    pub signing_key: SigningKey,
    pub user_address: UserAddress,
    signing_private: PrivateKeyMaterial,
    address_public: PublicKeyMaterial,
    vault_publics: Vec<(String, PublicKeyMaterial)>,
    vault_entries: Vec<VaultKeyResponse>,
    item_entries: Vec<ItemKeyResponse>,
}

impl TestVault {
    pub fn new() -> Self {
        let engine = CryptoEngine::ephemeral().expect("engine");
        let kdf = fast_kdf();

        let signing_pass = PlainByteArray::new(b"signing key passphrase".to_vec());
        let signing_armored = generate_locked_key(&signing_pass, &kdf).expect("signing key");
        let signing_material =
            read_key(&signing_armored, true, Some(&signing_pass)).expect("read signing key");
        let signing_private = signing_material
            .unlock_private(&signing_pass)
            .expect("unlock signing key");
        let signing_key = SigningKey::new(signing_material);

        let address_pass = PlainByteArray::new(b"address key passphrase".to_vec());
        let address_armored = generate_locked_key(&address_pass, &kdf).expect("address key");
        let address_material =
            read_key(&address_armored, true, Some(&address_pass)).expect("read address key");
        let address_public = address_material.public().clone();
        let encrypted_address_pass = engine
            .keystore()
            .encrypt(&address_pass)
            .expect("encrypt address passphrase");
        let user_address = UserAddress::new(vec![AddressKey {
            key: address_material,
            encrypted_passphrase: Some(encrypted_address_pass),
        }]);

        Self {
            engine,
            signing_key,
            user_address,
            signing_private,
            address_public,
            vault_publics: Vec::new(),
            vault_entries: Vec::new(),
            item_entries: Vec::new(),
        }
    }

    /// Mint a vault key and its item key for one rotation.
    pub fn add_rotation(&mut self, rotation_id: &str, rotation: i64) {
        self.add_vault_key(rotation_id, rotation);
        self.add_item_key(rotation_id);
    }

    /// Mint a vault key entry: locked keypair, sealed passphrase, signed
    /// fingerprint.
    pub fn add_vault_key(&mut self, rotation_id: &str, rotation: i64) {
        let kdf = fast_kdf();
        let passphrase =
            PlainByteArray::new(format!("vault passphrase {rotation_id}").into_bytes());
        let armored = generate_locked_key(&passphrase, &kdf).expect("vault key");
        let signature =
            sign_key_fingerprint(&self.signing_private, &armored).expect("sign vault key");
        let sealed = seal_passphrase(&self.address_public, &passphrase).expect("seal passphrase");

        let material = read_key(&armored, false, None).expect("read vault key");
        self.vault_publics
            .push((rotation_id.to_string(), material.public().clone()));

        self.vault_entries.push(VaultKeyResponse {
            rotation_id: rotation_id.into(),
            rotation,
            key: armored,
            key_signature: signature,
            key_passphrase: Some(sealed),
        });
    }

    /// Mint an item key entry sealed to the rotation's vault key.
    ///
    /// Panics if the vault key was not minted first; use
    /// [`add_orphan_item_key`](Self::add_orphan_item_key) to build
    /// deliberately inconsistent responses.
    pub fn add_item_key(&mut self, rotation_id: &str) {
        let vault_public = self
            .vault_publics
            .iter()
            .find(|(id, _)| id == rotation_id)
            .map(|(_, public)| public.clone())
            .expect("vault key must be minted before its item key");
        self.push_item_entry(rotation_id, &vault_public);
    }

    /// Mint an item key entry whose rotation has no vault key, for
    /// orphan-detection tests. The passphrase is sealed to the address
    /// key; `open_keys` must abort before ever trying to open it.
    pub fn add_orphan_item_key(&mut self, rotation_id: &str) {
        let address_public = self.address_public.clone();
        self.push_item_entry(rotation_id, &address_public);
    }

    fn push_item_entry(&mut self, rotation_id: &str, recipient: &PublicKeyMaterial) {
        let kdf = fast_kdf();
        let passphrase =
            PlainByteArray::new(format!("item passphrase {rotation_id}").into_bytes());
        let armored = generate_locked_key(&passphrase, &kdf).expect("item key");
        let signature =
            sign_key_fingerprint(&self.signing_private, &armored).expect("sign item key");
        let sealed = seal_passphrase(recipient, &passphrase).expect("seal passphrase");

        self.item_entries.push(ItemKeyResponse {
            rotation_id: rotation_id.into(),
            key: armored,
            key_signature: signature,
            key_passphrase: Some(sealed),
        });
    }

    /// Corrupt the signature of the vault key entry at `index`.
    pub fn break_vault_key_signature(&mut self, index: usize) {
        let other_pass = PlainByteArray::new(b"unrelated".to_vec());
        let other_key = generate_locked_key(&other_pass, &fast_kdf()).expect("key");
        self.vault_entries[index].key_signature =
            sign_key_fingerprint(&self.signing_private, &other_key).expect("signature");
    }

    /// The response object `open_keys` consumes.
    pub fn response(&self) -> VaultItemKeyListResponse {
        VaultItemKeyListResponse {
            vault_keys: self.vault_entries.clone(),
            item_keys: self.item_entries.clone(),
        }
    }

    /// The author's public key material, for user-signature verification
    /// in open-item tests.
    pub fn author_public(&self) -> &PublicKeyMaterial {
        &self.address_public
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a create-item request into the stored revision the repository
/// layer would hand back, playing the server's role.
pub fn revision_from_request(
    request: &CreateItemRequest,
    item_id: &str,
    revision: i64,
    alias_email: Option<&str>,
) -> ItemRevision {
    ItemRevision {
        item_id: keywarden_core::ItemId(item_id.to_string()),
        rotation_id: request.rotation_id.clone(),
        revision,
        content_format_version: CONTENT_FORMAT_VERSION,
        key_packet: request.vault_key_packet.clone(),
        content: request.content.clone(),
        user_signature: Some(request.user_signature.clone()),
        item_key_signature: Some(request.item_key_signature.clone()),
        state: 1,
        alias_email: alias_email.map(str::to_string),
        create_time: 1_700_000_000,
        modify_time: 1_700_000_000,
        package_info_set: Default::default(),
    }
}
