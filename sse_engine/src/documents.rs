// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Document Cipher
//!
//! Document bodies never touch the index at all — they are encrypted
//! under `K4` exactly like a chain node body (spec §4.4), and the server
//! never decrypts them; it only ever hands the encrypted blob back to
//! whichever client holds `K4`.
//!
//! This module also owns the one-file-per-document persistence layout: a
//! document id maps to a sibling file in the documents directory, holding
//! the raw `IV ‖ ciphertext` bytes [`sse_domain::crypto::ske_encrypt`]
//! produces.

use std::fs;
use std::path::Path;

use sse_domain::{ClientKey, DocumentId, SseError};

/// Encrypts one document body under `key`. A thin wrapper so call sites
/// in [`crate::client::Client`] read as document operations, not raw
/// cipher calls.
pub fn encrypt_document(key: &ClientKey, plaintext: &[u8]) -> Vec<u8> {
    sse_domain::crypto::ske_encrypt(key.as_bytes(), plaintext)
}

/// Writes each encrypted document to `dir/<id>.enc`, creating `dir` if
/// needed. Used by the CLI's `build` subcommand to persist the corpus
/// alongside the index.
pub fn write_documents(
    dir: &Path,
    encrypted: &std::collections::HashMap<DocumentId, Vec<u8>>,
) -> Result<(), SseError> {
    fs::create_dir_all(dir).map_err(|e| SseError::Io(e.to_string()))?;
    for (id, blob) in encrypted {
        let path = dir.join(format!("{}.enc", id.as_str()));
        fs::write(&path, blob).map_err(|e| SseError::Io(e.to_string()))?;
    }
    Ok(())
}

/// Reads one document's ciphertext back from `dir/<id>.enc`.
pub fn read_document(dir: &Path, id: &DocumentId) -> Result<Vec<u8>, SseError> {
    let path = dir.join(format!("{}.enc", id.as_str()));
    fs::read(&path).map_err(|e| SseError::Io(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let key = ClientKey::random();
        let id = DocumentId::new("doc1.txt").unwrap();
        let mut docs = std::collections::HashMap::new();
        docs.insert(id.clone(), encrypt_document(&key, b"hello world"));

        write_documents(dir.path(), &docs).unwrap();
        let blob = read_document(dir.path(), &id).unwrap();
        let plaintext = sse_domain::crypto::ske_decrypt(key.as_bytes(), &blob).unwrap();
        assert_eq!(plaintext, b"hello world");
    }

    #[test]
    fn missing_document_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let id = DocumentId::new("missing.txt").unwrap();
        assert!(read_document(dir.path(), &id).is_err());
    }
}
