// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Client Key Value Object
//!
//! A 16-byte secret key. The client holds four of these (`K1..K4`), each
//! seeding a distinct PRF or cipher role; a server-side key (the per-node
//! encryption key embedded in a chain node) is the same shape and reuses
//! this type.
//!
//! Keys are wiped from memory on drop via [`zeroize::Zeroize`] — the
//! reference implementation does not do this, but a systems reimplementation
//! should (spec §5, "Resource scoping").

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::SseError;

pub const KEY_LEN: usize = 16;

#[derive(Clone, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct ClientKey([u8; KEY_LEN]);

impl ClientKey {
    /// Draws a fresh key from the OS random source.
    pub fn random() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wraps existing key material, rejecting anything but exactly 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SseError> {
        if bytes.len() != KEY_LEN {
            return Err(SseError::Crypto(format!(
                "key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; KEY_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// The all-zero sentinel key used for the tail node of a chain
    /// (spec §3: "the tail node has ... `k = 0x00·16`").
    pub fn zero() -> Self {
        Self([0u8; KEY_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for ClientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClientKey").field(&"<redacted>").finish()
    }
}

impl PartialEq for ClientKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for ClientKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert!(ClientKey::from_bytes(&[0u8; 15]).is_err());
        assert!(ClientKey::from_bytes(&[0u8; 16]).is_ok());
    }

    #[test]
    fn random_keys_differ() {
        assert_ne!(ClientKey::random().as_bytes(), ClientKey::random().as_bytes());
    }

    #[test]
    fn zero_key_is_all_zero() {
        assert_eq!(ClientKey::zero().as_bytes(), &[0u8; 16]);
    }
}
