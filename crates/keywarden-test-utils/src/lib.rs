// SPDX-FileCopyrightText: 2026 Keywarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Keywarden integration tests.
//!
//! Provides deterministic key fixtures and response builders for fast,
//! CI-runnable tests without a server.
//!
//! # Components
//!
//! - [`TestVault`] - a self-contained signing key, user address, and
//!   signed key-list response builder
//! - [`revision_from_request`] - turns an outbound create-item request
//!   into the stored revision a server would return
//! - [`fast_kdf`] - low-cost Argon2id parameters for tests

pub mod fixtures;

pub use fixtures::{fast_kdf, revision_from_request, TestVault};
