// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Cryptographic Primitives
//!
//! The four primitives the SSE-1 construction is built from: two PRFs used
//! for addressing and masking, and a symmetric cipher used for both chain
//! nodes and document payloads.
//!
//! `PrfOutput` retains the full 256-bit SHA-256 digest at the interface and
//! is reduced modulo a table size only at the call site, matching the
//! source contract (`PRF(key, data) -> unbounded non-negative integer`).
//!
//! `prf_bytes` is deliberately PBKDF2-HMAC-SHA256 rather than a direct HMAC
//! call: that is the scheme's concrete choice, not a typical SSE
//! presentation, and must be preserved bit-exactly for cross-implementation
//! compatibility.

use aes::Aes128;
use cbc::cipher::{
    block_padding::Pkcs7, generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut, KeyIvInit,
};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::SseError;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const IV_LEN: usize = 16;
const PBKDF2_ITERATIONS: u32 = 1000;

/// The full 256-bit output of [`prf_int`], kept big-endian and reduced
/// modulo a table size only where an address or table index is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrfOutput([u8; 32]);

impl PrfOutput {
    /// Reduces the digest modulo `modulus`, treating the digest as a
    /// base-256 big-endian integer (the same semantics as Python's
    /// `int.from_bytes(..., 'big') % modulus`).
    pub fn reduce_mod(&self, modulus: u32) -> u32 {
        self.0
            .iter()
            .fold(0u64, |acc, &byte| (acc * 256 + byte as u64) % modulus as u64) as u32
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// `PRF_int(key, data)`: SHA-256 over `key ‖ utf8(data)`.
pub fn prf_int(key: &[u8; 16], data: &str) -> PrfOutput {
    let mut hasher = Sha256::new();
    hasher.update(key);
    hasher.update(data.as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    PrfOutput(out)
}

/// `PRF_bytes(key, data, length)`: PBKDF2-HMAC-SHA256 with
/// `password = utf8(data)`, `salt = key`, `iterations = 1000`.
pub fn prf_bytes(key: &[u8; 16], data: &str, length: usize) -> Vec<u8> {
    let mut out = vec![0u8; length];
    pbkdf2_hmac::<Sha256>(data.as_bytes(), key, PBKDF2_ITERATIONS, &mut out);
    out
}

/// `SKE_encrypt(key, plaintext)`: AES-128-CBC with a fresh random IV,
/// PKCS#7 padding. Output is `IV (16 B) ‖ ciphertext`.
pub fn ske_encrypt(key: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng.fill_bytes(&mut iv);

    let cipher = Aes128CbcEnc::new(GenericArray::from_slice(key), GenericArray::from_slice(&iv));
    let ct = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut out = Vec::with_capacity(IV_LEN + ct.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ct);
    out
}

/// `SKE_decrypt(key, ciphertext)`: inverse of [`ske_encrypt`]. A wrong key
/// surfaces as a generic [`SseError::Crypto`], never a panic.
pub fn ske_decrypt(key: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>, SseError> {
    if ciphertext.len() < IV_LEN {
        return Err(SseError::Crypto("ciphertext shorter than IV".into()));
    }
    let (iv, body) = ciphertext.split_at(IV_LEN);

    let cipher = Aes128CbcDec::new(GenericArray::from_slice(key), GenericArray::from_slice(iv));
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|_| SseError::Crypto("padding or decryption failure".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prf_int_is_deterministic() {
        let key = [7u8; 16];
        assert_eq!(prf_int(&key, "abc").as_bytes(), prf_int(&key, "abc").as_bytes());
    }

    #[test]
    fn prf_int_is_sensitive_to_input() {
        let key = [7u8; 16];
        assert_ne!(prf_int(&key, "abc").as_bytes(), prf_int(&key, "abd").as_bytes());
    }

    #[test]
    fn prf_bytes_is_deterministic_and_sized() {
        let key = [1u8; 16];
        let a = prf_bytes(&key, "diabetes", 20);
        let b = prf_bytes(&key, "diabetes", 20);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn mask_round_trip() {
        let key = [2u8; 16];
        let mut entry = [0u8; 20];
        entry[0..4].copy_from_slice(&42u32.to_be_bytes());
        entry[4..20].copy_from_slice(&[9u8; 16]);

        let mask = prf_bytes(&key, "diabetes", 20);
        let masked: Vec<u8> = entry.iter().zip(mask.iter()).map(|(a, b)| a ^ b).collect();
        let unmasked: Vec<u8> = masked.iter().zip(mask.iter()).map(|(a, b)| a ^ b).collect();
        assert_eq!(unmasked, entry);
    }

    #[test]
    fn ske_round_trip() {
        let key = [3u8; 16];
        let plaintext = b"hello searchable encryption";
        let ct = ske_encrypt(&key, plaintext);
        let pt = ske_decrypt(&key, &ct).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn ske_decrypt_rejects_short_ciphertext() {
        let key = [3u8; 16];
        assert!(ske_decrypt(&key, &[0u8; 4]).is_err());
    }

    #[test]
    fn ske_decrypt_wrong_key_fails_or_garbles() {
        let key_a = [3u8; 16];
        let key_b = [4u8; 16];
        let ct = ske_encrypt(&key_a, b"0123456789abcdef");
        match ske_decrypt(&key_b, &ct) {
            Err(_) => {}
            Ok(garbage) => assert_ne!(garbage, b"0123456789abcdef"),
        }
    }

    proptest::proptest! {
        #[test]
        fn mask_round_trip_holds_for_any_entry_and_key(
            key: [u8; 16],
            addr: u32,
            node_key: [u8; 16],
            keyword in "[a-z]{1,12}",
        ) {
            let mut entry = [0u8; 20];
            entry[0..4].copy_from_slice(&addr.to_be_bytes());
            entry[4..20].copy_from_slice(&node_key);

            let mask = prf_bytes(&key, &keyword, 20);
            let masked: Vec<u8> = entry.iter().zip(mask.iter()).map(|(a, b)| a ^ b).collect();
            let unmasked: Vec<u8> = masked.iter().zip(mask.iter()).map(|(a, b)| a ^ b).collect();
            proptest::prop_assert_eq!(unmasked, entry.to_vec());
        }
    }
}
