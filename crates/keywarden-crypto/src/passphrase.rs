// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opening and sealing key passphrases.
//!
//! Vault key passphrases are sealed to the user's address keys; item key
//! passphrases to the owning vault key. An absent passphrase means this
//! device has no private access to the key -- a valid state, returned as
//! `None`. Decrypted passphrases are immediately re-encrypted under the
//! device keystore; the plaintext never leaves this module.

use keywarden_core::{EncryptedByteArray, KeywardenError, PlainByteArray};

use crate::armor;
use crate::engine::CryptoEngine;
use crate::key_material::PublicKeyMaterial;
use crate::keyring::{UserAddress, VaultKey};
use crate::sealed;

/// Open a vault key's passphrase with the user's address keys.
pub fn open_vault_passphrase(
    engine: &CryptoEngine,
    armored_passphrase: Option<&str>,
    user_address: &UserAddress,
) -> Result<Option<EncryptedByteArray>, KeywardenError> {
    let Some(armored) = armored_passphrase else {
        return Ok(None);
    };
    let sealed_bytes = decode_passphrase(armored)?;

    // The passphrase is sealed to one of the address keys; try each key
    // this device can unlock.
    let mut last_err = None;
    for address_key in &user_address.keys {
        let Some(private) = address_key.unlock(engine)? else {
            continue;
        };
        match sealed::open_from(private.decrypt_key(), &sealed_bytes) {
            Ok(plaintext) => return engine.keystore().encrypt(&plaintext).map(Some),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or(KeywardenError::PrivateKeyUnavailable))
}

/// Open an item key's passphrase with the owning vault key.
pub fn open_item_passphrase(
    engine: &CryptoEngine,
    armored_passphrase: Option<&str>,
    vault_key: &VaultKey,
) -> Result<Option<EncryptedByteArray>, KeywardenError> {
    let Some(armored) = armored_passphrase else {
        return Ok(None);
    };
    let sealed_bytes = decode_passphrase(armored)?;

    vault_key.with_private_key(engine, |private| {
        let plaintext = sealed::open_from(private.decrypt_key(), &sealed_bytes)?;
        engine.keystore().encrypt(&plaintext).map(Some)
    })
}

/// Seal a passphrase to a recipient key, producing the base64 form
/// distributed with new key rotations.
pub fn seal_passphrase(
    recipient: &PublicKeyMaterial,
    passphrase: &PlainByteArray,
) -> Result<String, KeywardenError> {
    sealed::seal_to(recipient.encrypt_key(), passphrase.as_slice()).map(|b| armor::encode(&b))
}

fn decode_passphrase(armored: &str) -> Result<Vec<u8>, KeywardenError> {
    armor::decode(armored)
        .map_err(|e| KeywardenError::Decryption(format!("invalid passphrase encoding: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_config::KdfConfig;
    use keywarden_core::{PlainByteArray, RotationId};

    use crate::key_material::{generate_locked_key, read_key};
    use crate::keyring::AddressKey;

    fn test_kdf() -> KdfConfig {
        KdfConfig {
            memory_cost: 32768,
            iterations: 2,
            parallelism: 1,
        }
    }

    fn engine() -> CryptoEngine {
        CryptoEngine::ephemeral().unwrap()
    }

    fn address_with_key(engine: &CryptoEngine) -> UserAddress {
        let passphrase = PlainByteArray::new(b"address pass".to_vec());
        let armored = generate_locked_key(&passphrase, &test_kdf()).unwrap();
        let key = read_key(&armored, true, Some(&passphrase)).unwrap();
        let encrypted = engine.keystore().encrypt(&passphrase).unwrap();
        UserAddress::new(vec![AddressKey {
            key,
            encrypted_passphrase: Some(encrypted),
        }])
    }

    #[test]
    fn absent_vault_passphrase_is_none_not_error() {
        let engine = engine();
        let address = address_with_key(&engine);
        let result = open_vault_passphrase(&engine, None, &address).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn vault_passphrase_roundtrip_through_address_key() {
        let engine = engine();
        let address = address_with_key(&engine);

        let secret = PlainByteArray::new(b"the vault key passphrase".to_vec());
        let sealed_b64 =
            seal_passphrase(address.keys[0].key.public(), &secret).unwrap();

        let opened = open_vault_passphrase(&engine, Some(&sealed_b64), &address)
            .unwrap()
            .expect("passphrase should open");

        // Comes back keystore-encrypted; decrypt locally to compare.
        let plain = engine.keystore().decrypt(&opened).unwrap();
        assert_eq!(plain.as_slice(), secret.as_slice());
    }

    #[test]
    fn passphrase_sealed_to_unknown_key_fails() {
        let engine = engine();
        let address = address_with_key(&engine);
        let other = address_with_key(&engine);

        let secret = PlainByteArray::new(b"passphrase".to_vec());
        let sealed_b64 = seal_passphrase(other.keys[0].key.public(), &secret).unwrap();

        let result = open_vault_passphrase(&engine, Some(&sealed_b64), &address);
        assert!(result.is_err());
    }

    #[test]
    fn item_passphrase_opens_through_vault_key() {
        let engine = engine();

        let vault_pass = PlainByteArray::new(b"vault pass".to_vec());
        let armored = generate_locked_key(&vault_pass, &test_kdf()).unwrap();
        let key = read_key(&armored, true, Some(&vault_pass)).unwrap();
        let vault_key = VaultKey {
            rotation_id: RotationId::from("r1"),
            rotation: 1,
            encrypted_passphrase: Some(engine.keystore().encrypt(&vault_pass).unwrap()),
            key,
        };

        let item_pass = PlainByteArray::new(b"item pass".to_vec());
        let sealed_b64 = seal_passphrase(vault_key.key.public(), &item_pass).unwrap();

        let opened = open_item_passphrase(&engine, Some(&sealed_b64), &vault_key)
            .unwrap()
            .expect("passphrase should open");
        let plain = engine.keystore().decrypt(&opened).unwrap();
        assert_eq!(plain.as_slice(), item_pass.as_slice());
    }

    #[test]
    fn item_passphrase_without_vault_private_access_fails() {
        let engine = engine();

        let vault_pass = PlainByteArray::new(b"vault pass".to_vec());
        let armored = generate_locked_key(&vault_pass, &test_kdf()).unwrap();
        let key = read_key(&armored, true, None).unwrap();
        let vault_key = VaultKey {
            rotation_id: RotationId::from("r1"),
            rotation: 1,
            encrypted_passphrase: None,
            key,
        };

        let item_pass = PlainByteArray::new(b"item pass".to_vec());
        let sealed_b64 = seal_passphrase(vault_key.key.public(), &item_pass).unwrap();

        let result = open_item_passphrase(&engine, Some(&sealed_b64), &vault_key);
        assert!(matches!(
            result,
            Err(KeywardenError::PrivateKeyUnavailable)
        ));
    }
}
