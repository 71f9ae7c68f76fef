// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item content serialization.
//!
//! Contents are encoded as a versioned bincode struct with an explicit
//! numeric discriminant and one optional body per content kind, so new
//! kinds can be added without breaking old payloads. The alias email is
//! deliberately NOT embedded: it lives in the separate alias record and
//! must be joined back in at decode time.

use keywarden_core::{ItemContents, ItemType, KeywardenError};
use serde::{Deserialize, Serialize};

/// Version stamped into every serialized content buffer and echoed in
/// create-item requests.
pub const CONTENT_FORMAT_VERSION: u16 = 1;

// Wire discriminants. 0 is reserved for unknown/future kinds and always
// fails decoding.
const KIND_UNKNOWN: u32 = 0;
const KIND_LOGIN: u32 = 1;
const KIND_ALIAS: u32 = 2;
const KIND_NOTE: u32 = 3;
const KIND_PASSWORD: u32 = 4;
const KIND_CREDIT_CARD: u32 = 5;

#[derive(Serialize, Deserialize)]
struct WireItemContent {
    version: u16,
    kind: u32,
    metadata: WireMetadata,
    login: Option<WireLogin>,
    alias: Option<WireAlias>,
    credit_card: Option<WireCreditCard>,
    password: Option<WirePassword>,
}

#[derive(Serialize, Deserialize)]
struct WireMetadata {
    title: String,
    note: String,
    /// Identifies the creating application/package for audit purposes.
    app_context: String,
}

#[derive(Serialize, Deserialize)]
struct WireLogin {
    username: String,
    password: String,
    urls: Vec<String>,
    totp_uri: String,
}

/// Marker body; the alias email itself is never embedded.
#[derive(Serialize, Deserialize)]
struct WireAlias {}

#[derive(Serialize, Deserialize)]
struct WireCreditCard {
    card_holder: String,
    number: String,
    expiration_date: String,
    cvv: String,
    pin: String,
}

#[derive(Serialize, Deserialize)]
struct WirePassword {
    password: String,
}

/// Serialize item contents into the versioned binary schema.
pub fn serialize(
    contents: &ItemContents,
    app_context: &str,
) -> Result<Vec<u8>, KeywardenError> {
    let mut wire = WireItemContent {
        version: CONTENT_FORMAT_VERSION,
        kind: KIND_UNKNOWN,
        metadata: WireMetadata {
            title: contents.title().to_string(),
            note: contents.note().to_string(),
            app_context: app_context.to_string(),
        },
        login: None,
        alias: None,
        credit_card: None,
        password: None,
    };

    match contents {
        ItemContents::Login {
            username,
            password,
            urls,
            totp_uri,
            ..
        } => {
            wire.kind = KIND_LOGIN;
            wire.login = Some(WireLogin {
                username: username.clone(),
                password: password.clone(),
                urls: urls.clone(),
                totp_uri: totp_uri.clone(),
            });
        }
        ItemContents::Alias { .. } => {
            wire.kind = KIND_ALIAS;
            wire.alias = Some(WireAlias {});
        }
        ItemContents::Note { .. } => {
            wire.kind = KIND_NOTE;
        }
        ItemContents::Password { password, .. } => {
            wire.kind = KIND_PASSWORD;
            wire.password = Some(WirePassword {
                password: password.clone(),
            });
        }
        ItemContents::CreditCard {
            card_holder,
            number,
            expiration_date,
            cvv,
            pin,
            ..
        } => {
            wire.kind = KIND_CREDIT_CARD;
            wire.credit_card = Some(WireCreditCard {
                card_holder: card_holder.clone(),
                number: number.clone(),
                expiration_date: expiration_date.clone(),
                cvv: cvv.clone(),
                pin: pin.clone(),
            });
        }
    }

    bincode::serialize(&wire)
        .map_err(|e| KeywardenError::MalformedContent(format!("content encoding failed: {e}")))
}

/// Deserialize a content buffer back into item contents plus the
/// reconstructed discriminant.
///
/// `alias_email` must be supplied (joined from the separate alias
/// record) when the buffer holds an alias; its absence there is a
/// contract violation, not a recoverable condition.
pub fn deserialize(
    buffer: &[u8],
    alias_email: Option<&str>,
) -> Result<(ItemContents, ItemType), KeywardenError> {
    let wire: WireItemContent = bincode::deserialize(buffer)
        .map_err(|e| KeywardenError::MalformedContent(format!("content decoding failed: {e}")))?;
    if wire.version != CONTENT_FORMAT_VERSION {
        return Err(KeywardenError::MalformedContent(format!(
            "unsupported content format version {}",
            wire.version
        )));
    }

    let WireMetadata { title, note, .. } = wire.metadata;

    let contents = match wire.kind {
        KIND_LOGIN => {
            let body = wire.login.ok_or_else(|| missing_body("login"))?;
            ItemContents::Login {
                title,
                note,
                username: body.username,
                password: body.password,
                urls: body.urls,
                totp_uri: body.totp_uri,
            }
        }
        KIND_ALIAS => {
            wire.alias.ok_or_else(|| missing_body("alias"))?;
            let alias_email = alias_email.ok_or(KeywardenError::MissingAliasEmail)?;
            ItemContents::Alias {
                title,
                note,
                alias_email: alias_email.to_string(),
            }
        }
        KIND_NOTE => ItemContents::Note { title, note },
        KIND_PASSWORD => {
            let body = wire.password.ok_or_else(|| missing_body("password"))?;
            ItemContents::Password {
                title,
                note,
                password: body.password,
            }
        }
        KIND_CREDIT_CARD => {
            let body = wire.credit_card.ok_or_else(|| missing_body("credit card"))?;
            ItemContents::CreditCard {
                title,
                note,
                card_holder: body.card_holder,
                number: body.number,
                expiration_date: body.expiration_date,
                cvv: body.cvv,
                pin: body.pin,
            }
        }
        other => return Err(KeywardenError::UnknownContentType(other)),
    };

    let item_type = contents.item_type();
    Ok((contents, item_type))
}

/// The app context recorded when the buffer was created.
pub fn app_context(buffer: &[u8]) -> Result<String, KeywardenError> {
    let wire: WireItemContent = bincode::deserialize(buffer)
        .map_err(|e| KeywardenError::MalformedContent(format!("content decoding failed: {e}")))?;
    Ok(wire.metadata.app_context)
}

fn missing_body(kind: &str) -> KeywardenError {
    KeywardenError::MalformedContent(format!("{kind} content has no body"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn login() -> ItemContents {
        ItemContents::Login {
            title: "Work email".into(),
            note: "shared inbox".into(),
            username: "user@example.com".into(),
            password: "hunter2".into(),
            urls: vec!["https://mail.example.com".into()],
            totp_uri: "otpauth://totp/x?secret=abc".into(),
        }
    }

    #[test]
    fn login_round_trip() {
        let buffer = serialize(&login(), "com.example.app").unwrap();
        let (decoded, item_type) = deserialize(&buffer, None).unwrap();
        assert_eq!(decoded, login());
        assert_eq!(item_type, ItemType::Login);
    }

    #[test]
    fn note_round_trip() {
        let contents = ItemContents::Note {
            title: "Wifi".into(),
            note: "password on the router".into(),
        };
        let buffer = serialize(&contents, "ctx").unwrap();
        let (decoded, item_type) = deserialize(&buffer, None).unwrap();
        assert_eq!(decoded, contents);
        assert_eq!(item_type, ItemType::Note);
    }

    #[test]
    fn alias_round_trip_requires_external_email() {
        let contents = ItemContents::Alias {
            title: "Shopping alias".into(),
            note: String::new(),
            alias_email: "alias@example.com".into(),
        };
        let buffer = serialize(&contents, "ctx").unwrap();

        // The email is not embedded: decoding without it is a contract
        // violation.
        let err = deserialize(&buffer, None).unwrap_err();
        assert!(matches!(err, KeywardenError::MissingAliasEmail));

        let (decoded, item_type) = deserialize(&buffer, Some("alias@example.com")).unwrap();
        assert_eq!(decoded, contents);
        assert_eq!(item_type, ItemType::Alias);
    }

    #[test]
    fn alias_email_is_not_in_the_buffer() {
        let contents = ItemContents::Alias {
            title: "t".into(),
            note: "n".into(),
            alias_email: "super-secret-alias@example.com".into(),
        };
        let buffer = serialize(&contents, "ctx").unwrap();
        let needle = b"super-secret-alias";
        assert!(
            !buffer.windows(needle.len()).any(|w| w == needle),
            "alias email must not be embedded in the payload"
        );
    }

    #[test]
    fn credit_card_round_trip() {
        let contents = ItemContents::CreditCard {
            title: "Visa".into(),
            note: String::new(),
            card_holder: "A. Holder".into(),
            number: "4111111111111111".into(),
            expiration_date: "12/30".into(),
            cvv: "123".into(),
            pin: "0000".into(),
        };
        let buffer = serialize(&contents, "ctx").unwrap();
        let (decoded, item_type) = deserialize(&buffer, None).unwrap();
        assert_eq!(decoded, contents);
        assert_eq!(item_type, ItemType::CreditCard);
    }

    #[test]
    fn password_round_trip() {
        let contents = ItemContents::Password {
            title: "Generated".into(),
            note: String::new(),
            password: "correct horse battery staple".into(),
        };
        let buffer = serialize(&contents, "ctx").unwrap();
        let (decoded, item_type) = deserialize(&buffer, None).unwrap();
        assert_eq!(decoded, contents);
        assert_eq!(item_type, ItemType::Password);
    }

    #[test]
    fn unknown_discriminant_fails_loudly() {
        let wire = WireItemContent {
            version: CONTENT_FORMAT_VERSION,
            kind: 42,
            metadata: WireMetadata {
                title: String::new(),
                note: String::new(),
                app_context: String::new(),
            },
            login: None,
            alias: None,
            credit_card: None,
            password: None,
        };
        let buffer = bincode::serialize(&wire).unwrap();
        let err = deserialize(&buffer, None).unwrap_err();
        assert!(matches!(err, KeywardenError::UnknownContentType(42)));
    }

    #[test]
    fn reserved_zero_discriminant_fails() {
        let wire = WireItemContent {
            version: CONTENT_FORMAT_VERSION,
            kind: KIND_UNKNOWN,
            metadata: WireMetadata {
                title: String::new(),
                note: String::new(),
                app_context: String::new(),
            },
            login: None,
            alias: None,
            credit_card: None,
            password: None,
        };
        let buffer = bincode::serialize(&wire).unwrap();
        assert!(matches!(
            deserialize(&buffer, None),
            Err(KeywardenError::UnknownContentType(0))
        ));
    }

    #[test]
    fn discriminant_without_body_is_malformed() {
        let wire = WireItemContent {
            version: CONTENT_FORMAT_VERSION,
            kind: KIND_LOGIN,
            metadata: WireMetadata {
                title: String::new(),
                note: String::new(),
                app_context: String::new(),
            },
            login: None,
            alias: None,
            credit_card: None,
            password: None,
        };
        let buffer = bincode::serialize(&wire).unwrap();
        assert!(matches!(
            deserialize(&buffer, None),
            Err(KeywardenError::MalformedContent(_))
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let wire = WireItemContent {
            version: CONTENT_FORMAT_VERSION + 1,
            kind: KIND_NOTE,
            metadata: WireMetadata {
                title: String::new(),
                note: String::new(),
                app_context: String::new(),
            },
            login: None,
            alias: None,
            credit_card: None,
            password: None,
        };
        let buffer = bincode::serialize(&wire).unwrap();
        assert!(matches!(
            deserialize(&buffer, None),
            Err(KeywardenError::MalformedContent(_))
        ));
    }

    #[test]
    fn garbage_buffer_is_malformed() {
        assert!(matches!(
            deserialize(b"definitely not bincode", None),
            Err(KeywardenError::MalformedContent(_))
        ));
    }

    #[test]
    fn app_context_is_recoverable() {
        let buffer = serialize(&login(), "com.example.autofill").unwrap();
        assert_eq!(app_context(&buffer).unwrap(), "com.example.autofill");
    }

    proptest! {
        #[test]
        fn any_login_round_trips(
            title in ".{0,40}",
            note in ".{0,80}",
            username in ".{0,40}",
            password in ".{0,40}",
            urls in proptest::collection::vec(".{0,60}", 0..4),
            totp_uri in ".{0,60}",
        ) {
            let contents = ItemContents::Login {
                title, note, username, password, urls, totp_uri,
            };
            let buffer = serialize(&contents, "ctx").unwrap();
            let (decoded, _) = deserialize(&buffer, None).unwrap();
            prop_assert_eq!(decoded, contents);
        }

        #[test]
        fn any_note_round_trips(title in ".{0,40}", note in ".{0,200}") {
            let contents = ItemContents::Note { title, note };
            let buffer = serialize(&contents, "ctx").unwrap();
            let (decoded, _) = deserialize(&buffer, None).unwrap();
            prop_assert_eq!(decoded, contents);
        }
    }
}
