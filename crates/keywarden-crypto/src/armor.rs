// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base64 armoring of binary wire blobs.
//!
//! Keys, packets, and signatures travel as standard-alphabet base64
//! strings. Callers map decode failures into their own error kind
//! (`MalformedKey` for key blobs, `Decryption` for packets), so this
//! module surfaces the raw decode error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode binary wire bytes as a base64 string.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 string back into wire bytes.
pub fn decode(armored: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(armored)
}
