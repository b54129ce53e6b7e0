// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! Errors raised by the cryptographic core and its value objects. The error
//! kinds mirror the taxonomy in the scheme's design: crypto failures, the
//! capacity guard on index construction, malformed chain nodes, and
//! malformed trapdoors.
//!
//! ## Leakage policy
//!
//! On the server side, a forged trapdoor, an unindexed keyword, and a
//! terminated chain must all be indistinguishable to the caller: the search
//! path collapses every one of these into an empty result rather than
//! propagating a `SseError`. These error variants exist for the client side
//! (document decryption, index construction) and for the server's internal
//! diagnostics only.

use thiserror::Error;

/// Domain-specific errors for the SSE engine.
#[derive(Error, Debug, Clone)]
pub enum SseError {
    /// Wrong key length, padding failure, or AES-CBC decrypt failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Build attempted with a posting count too close to the table size `M`.
    #[error("index capacity exceeded: {0}")]
    IndexCapacity(String),

    /// Server-side parse failure: malformed node JSON, hex field of the
    /// wrong length, or a `ptr` that is neither `NULL` nor a valid 4-byte
    /// hex address.
    #[error("corrupted node: {0}")]
    CorruptedNode(String),

    /// Trapdoor mask length was not 20 bytes.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Persistence failure reading or writing `A`, `T`, or a document file.
    #[error("io error: {0}")]
    Io(String),
}

pub type SseResult<T> = Result<T, SseError>;
