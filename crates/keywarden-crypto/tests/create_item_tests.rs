// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire-shape and validation tests for the create-item operation.
//!
//! These live as integration tests (rather than an in-crate `mod tests`)
//! because they rely on `keywarden-test-utils`, which itself depends on
//! `keywarden-crypto`; driving the operation through the external crate
//! view keeps a single copy of the crate in the dependency graph.

use keywarden_core::{ItemContents, KeywardenError};
use keywarden_crypto::{create_item, open_keys};
use keywarden_test_utils::TestVault;

fn note(text: &str) -> ItemContents {
    ItemContents::Note {
        title: "Note".into(),
        note: text.into(),
    }
}

#[test]
fn request_uses_camel_case_wire_names() {
    let mut vault = TestVault::new();
    vault.add_rotation("r1", 1);
    let keyring = open_keys(
        &vault.engine,
        &vault.response(),
        &vault.signing_key,
        &vault.user_address,
    )
    .unwrap();

    let request = create_item(
        &vault.engine,
        keyring.primary_vault_key().unwrap(),
        keyring.primary_item_key().unwrap(),
        &vault.user_address,
        &note("hello"),
        "ctx",
    )
    .unwrap();

    let value = serde_json::to_value(&request).unwrap();
    let object = value.as_object().unwrap();
    for field in [
        "rotationId",
        "contentFormatVersion",
        "vaultKeyPacket",
        "vaultKeyPacketSignature",
        "userSignature",
        "itemKeySignature",
        "content",
    ] {
        assert!(object.contains_key(field), "missing wire field {field}");
    }
    assert_eq!(object["rotationId"], "r1");
    assert_eq!(object["contentFormatVersion"], 1);
}

#[test]
fn oversized_content_is_rejected_before_encryption() {
    let mut vault = TestVault::new();
    vault.add_rotation("r1", 1);
    let keyring = open_keys(
        &vault.engine,
        &vault.response(),
        &vault.signing_key,
        &vault.user_address,
    )
    .unwrap();

    let huge = "x".repeat(vault.engine.content().max_content_size + 1);
    let result = create_item(
        &vault.engine,
        keyring.primary_vault_key().unwrap(),
        keyring.primary_item_key().unwrap(),
        &vault.user_address,
        &note(&huge),
        "ctx",
    );
    assert!(matches!(result, Err(KeywardenError::MalformedContent(_))));
}
