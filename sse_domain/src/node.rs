// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chain Node Model
//!
//! The plaintext layout of a single node in the server's array `A`, and its
//! wire encoding. A node carries its own document id, the key needed to
//! decrypt its *successor*, and a pointer to that successor — never a key
//! to decrypt itself, which is why each node is encrypted under the key
//! stored in its *predecessor* (or, for the head, the key stored in `T`).
//!
//! The JSON shape `{"id", "k", "ptr"}` (`k`/`ptr` hex-encoded, `ptr` the
//! literal `"NULL"` for the tail) is part of the wire contract (spec §3,
//! §6): it is what a peer decrypts and parses on the other side, so it is
//! preserved exactly rather than replaced by a terser binary layout.

use serde::{Deserialize, Serialize};

use crate::error::SseError;
use crate::value_objects::{ClientKey, DocumentId, NodeAddress};

/// Either a pointer to the next node, or the sentinel end-of-chain marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePointer {
    Next(NodeAddress),
    Null,
}

#[derive(Debug, Clone)]
pub struct IndexNode {
    pub id: DocumentId,
    /// Key to decrypt the *next* node, or the all-zero sentinel for the tail.
    pub next_key: ClientKey,
    pub ptr: NodePointer,
}

/// The on-the-wire JSON shape. Kept separate from [`IndexNode`] so the
/// validated domain type never leaks a raw, unchecked string field.
#[derive(Serialize, Deserialize)]
struct NodeWire {
    id: String,
    k: String,
    ptr: String,
}

impl IndexNode {
    pub fn to_json_bytes(&self) -> Vec<u8> {
        let wire = NodeWire {
            id: self.id.as_str().to_string(),
            k: hex::encode(self.next_key.as_bytes()),
            ptr: match self.ptr {
                NodePointer::Next(addr) => hex::encode(addr.to_be_bytes()),
                NodePointer::Null => "NULL".to_string(),
            },
        };
        // A malformed wire struct would be a programming error, not a
        // runtime condition: the fields above are always valid UTF-8/JSON.
        serde_json::to_vec(&wire).expect("node wire struct is always serializable")
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, SseError> {
        let wire: NodeWire = serde_json::from_slice(bytes)
            .map_err(|e| SseError::CorruptedNode(format!("malformed node JSON: {e}")))?;

        let id = DocumentId::new(wire.id)
            .map_err(|e| SseError::CorruptedNode(format!("invalid node id: {e}")))?;

        let key_bytes = hex::decode(&wire.k)
            .map_err(|e| SseError::CorruptedNode(format!("invalid node key hex: {e}")))?;
        let next_key = ClientKey::from_bytes(&key_bytes)
            .map_err(|e| SseError::CorruptedNode(format!("invalid node key: {e}")))?;

        let ptr = if wire.ptr == "NULL" {
            NodePointer::Null
        } else {
            let addr_bytes = hex::decode(&wire.ptr)
                .map_err(|e| SseError::CorruptedNode(format!("invalid node ptr hex: {e}")))?;
            NodePointer::Next(NodeAddress::from_be_bytes(&addr_bytes)?)
        };

        Ok(Self { id, next_key, ptr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_interior_node() {
        let node = IndexNode {
            id: DocumentId::new("doc1.txt").unwrap(),
            next_key: ClientKey::random(),
            ptr: NodePointer::Next(NodeAddress::new(99, 32_749).unwrap()),
        };
        let bytes = node.to_json_bytes();
        let parsed = IndexNode::from_json_bytes(&bytes).unwrap();
        assert_eq!(parsed.id, node.id);
        assert_eq!(parsed.next_key.as_bytes(), node.next_key.as_bytes());
        assert_eq!(parsed.ptr, node.ptr);
    }

    #[test]
    fn round_trips_tail_node() {
        let node = IndexNode {
            id: DocumentId::new("doc2.txt").unwrap(),
            next_key: ClientKey::zero(),
            ptr: NodePointer::Null,
        };
        let parsed = IndexNode::from_json_bytes(&node.to_json_bytes()).unwrap();
        assert_eq!(parsed.ptr, NodePointer::Null);
        assert_eq!(parsed.next_key.as_bytes(), &[0u8; 16]);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(IndexNode::from_json_bytes(b"not json").is_err());
    }

    #[test]
    fn rejects_bad_ptr_hex() {
        let bad = br#"{"id":"d","k":"00000000000000000000000000000000","ptr":"zz"}"#;
        assert!(IndexNode::from_json_bytes(bad).is_err());
    }
}
