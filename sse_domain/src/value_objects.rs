// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Value Objects
//!
//! Validated, immutable newtypes for every concept that crosses a domain
//! boundary in this crate: client keys, document and keyword identifiers,
//! array/table addressing, and the trapdoor itself.

pub mod client_key;
pub mod document_id;
pub mod keyword;
pub mod node_address;
pub mod trapdoor;

pub use client_key::ClientKey;
pub use document_id::DocumentId;
pub use keyword::Keyword;
pub use node_address::{NodeAddress, TableIndex};
pub use trapdoor::Trapdoor;
