// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Keywarden crypto core.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::KeywardenError;
use crate::secret::EncryptedByteArray;

/// Identifier of one rotation epoch of vault/item key material.
///
/// Opaque server-assigned string; higher `rotation` numbers (not ids)
/// identify newer epochs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotationId(pub String);

impl fmt::Display for RotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RotationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Unique identifier for a stored item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

/// Discriminant of an item's content, reconstructed from the decrypted
/// payload at open time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ItemType {
    Login,
    Alias,
    Note,
    Password,
    CreditCard,
}

/// Lifecycle state of a stored item.
///
/// Items are moved to `Trashed` rather than deleted outright; permanent
/// destruction is an explicit purge handled by the repository layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    Active,
    Trashed,
}

impl ItemState {
    /// Wire code used in item revision records.
    pub fn code(self) -> i64 {
        match self {
            ItemState::Active => 1,
            ItemState::Trashed => 2,
        }
    }
}

impl TryFrom<i64> for ItemState {
    type Error = KeywardenError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ItemState::Active),
            2 => Ok(ItemState::Trashed),
            other => Err(KeywardenError::MalformedContent(format!(
                "unknown item state code: {other}"
            ))),
        }
    }
}

/// App/website association for an item, stored in clear since it is not
/// secret.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PackageInfo {
    pub package_name: String,
    pub app_name: String,
}

/// The canonical in-memory representation of an item's plain-text fields
/// before serialization and encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContents {
    Login {
        title: String,
        note: String,
        username: String,
        password: String,
        urls: Vec<String>,
        totp_uri: String,
    },
    Note {
        title: String,
        note: String,
    },
    Alias {
        title: String,
        note: String,
        /// Joined from the separate alias record; never embedded in the
        /// encrypted payload.
        alias_email: String,
    },
    CreditCard {
        title: String,
        note: String,
        card_holder: String,
        number: String,
        expiration_date: String,
        cvv: String,
        pin: String,
    },
    Password {
        title: String,
        note: String,
        password: String,
    },
}

impl ItemContents {
    pub fn title(&self) -> &str {
        match self {
            ItemContents::Login { title, .. }
            | ItemContents::Note { title, .. }
            | ItemContents::Alias { title, .. }
            | ItemContents::CreditCard { title, .. }
            | ItemContents::Password { title, .. } => title,
        }
    }

    pub fn note(&self) -> &str {
        match self {
            ItemContents::Login { note, .. }
            | ItemContents::Note { note, .. }
            | ItemContents::Alias { note, .. }
            | ItemContents::CreditCard { note, .. }
            | ItemContents::Password { note, .. } => note,
        }
    }

    /// The discriminant this content reconstructs to.
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemContents::Login { .. } => ItemType::Login,
            ItemContents::Note { .. } => ItemType::Note,
            ItemContents::Alias { .. } => ItemType::Alias,
            ItemContents::CreditCard { .. } => ItemType::CreditCard,
            ItemContents::Password { .. } => ItemType::Password,
        }
    }
}

/// An opened item as handed back to repository/presentation layers.
///
/// `title`, `note`, and `content` are each independently encrypted under
/// the device keystore key; plain text is recovered on demand through the
/// engine's keystore crypto and never stored durably.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub revision: i64,
    pub item_type: ItemType,
    pub title: EncryptedByteArray,
    pub note: EncryptedByteArray,
    pub content: EncryptedByteArray,
    pub state: ItemState,
    pub create_time: i64,
    pub modify_time: i64,
    pub package_info_set: BTreeSet<PackageInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn item_type_display_and_from_str_round_trip() {
        let variants = [
            ItemType::Login,
            ItemType::Alias,
            ItemType::Note,
            ItemType::Password,
            ItemType::CreditCard,
        ];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = ItemType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn item_type_serialization() {
        let login = ItemType::Login;
        let json = serde_json::to_string(&login).expect("should serialize");
        let parsed: ItemType = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(login, parsed);
    }

    #[test]
    fn item_state_codes_round_trip() {
        assert_eq!(ItemState::try_from(1).unwrap(), ItemState::Active);
        assert_eq!(ItemState::try_from(2).unwrap(), ItemState::Trashed);
        assert_eq!(ItemState::Active.code(), 1);
        assert_eq!(ItemState::Trashed.code(), 2);
    }

    #[test]
    fn item_state_unknown_code_is_malformed_content() {
        let err = ItemState::try_from(7).unwrap_err();
        assert!(matches!(err, KeywardenError::MalformedContent(_)));
    }

    #[test]
    fn contents_accessors_cover_all_variants() {
        let contents = ItemContents::CreditCard {
            title: "Visa".into(),
            note: "personal".into(),
            card_holder: "A. Holder".into(),
            number: "4111111111111111".into(),
            expiration_date: "12/30".into(),
            cvv: "123".into(),
            pin: "0000".into(),
        };
        assert_eq!(contents.title(), "Visa");
        assert_eq!(contents.note(), "personal");
        assert_eq!(contents.item_type(), ItemType::CreditCard);
    }

    #[test]
    fn rotation_id_displays_raw_value() {
        let id = RotationId::from("rot-123");
        assert_eq!(id.to_string(), "rot-123");
    }

    #[test]
    fn package_info_orders_in_set() {
        let mut set = BTreeSet::new();
        set.insert(PackageInfo {
            package_name: "com.example.b".into(),
            app_name: "B".into(),
        });
        set.insert(PackageInfo {
            package_name: "com.example.a".into(),
            app_name: "A".into(),
        });
        let names: Vec<_> = set.iter().map(|p| p.package_name.as_str()).collect();
        assert_eq!(names, vec!["com.example.a", "com.example.b"]);
    }
}
