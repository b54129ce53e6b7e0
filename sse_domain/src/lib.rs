// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SSE Domain
//!
//! Pure, dependency-light cryptographic core of a Searchable Symmetric
//! Encryption engine implementing the Curtmola et al. SSE-1 construction:
//! the PRF/cipher primitives, the value objects for keys/identifiers/
//! addressing, the chain node model and its wire encoding, domain errors,
//! and the `IndexStore` port the server search algorithm is built against.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 sse_cli                     │
//! │   (argument parsing, logger bootstrap)       │
//! └─────────────────────────────────────────────┘
//!                      │
//! ┌─────────────────────────────────────────────┐
//! │                sse_engine                    │
//! │  (index builder, server search, documents,   │
//! │   binary persistence, configuration)         │
//! └─────────────────────────────────────────────┘
//!                      │
//! ┌─────────────────────────────────────────────┐
//! │                sse_domain (this crate)       │
//! │  (crypto primitives, value objects, node     │
//! │   model, errors, IndexStore port)            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! This crate has no I/O and no knowledge of how `A`/`T` are persisted or
//! transported; it only knows how to build and interpret their contents.

pub mod crypto;
pub mod error;
pub mod node;
pub mod repositories;
pub mod value_objects;

pub use error::{SseError, SseResult};
pub use node::{IndexNode, NodePointer};
pub use repositories::IndexStore;
pub use value_objects::{ClientKey, DocumentId, Keyword, NodeAddress, TableIndex, Trapdoor};
