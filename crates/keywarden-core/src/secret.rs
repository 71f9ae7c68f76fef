// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped holders for secret bytes.
//!
//! [`PlainByteArray`] wraps plaintext secret material (passphrases,
//! session keys, decrypted fields) and wipes its backing memory on drop,
//! on every exit path including error propagation. [`EncryptedByteArray`]
//! is the keystore-encrypted local form -- the only shape in which a
//! passphrase may outlive the function that decrypted it.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Plaintext secret bytes, wiped on drop.
///
/// Debug output intentionally omits the contents.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlainByteArray {
    bytes: Vec<u8>,
}

impl PlainByteArray {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for PlainByteArray {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for PlainByteArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlainByteArray([REDACTED; {} bytes])", self.bytes.len())
    }
}

/// Secret bytes encrypted under the device keystore key.
///
/// Safe to hold across calls and to hand to an external secure key-value
/// store; useless without the keystore crypto that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedByteArray {
    bytes: Vec<u8>,
}

impl EncryptedByteArray {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for EncryptedByteArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedByteArray({} bytes)", self.bytes.len())
    }
}
