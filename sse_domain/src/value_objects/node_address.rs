// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Node Address / Table Index Value Objects
//!
//! `NodeAddress` is a slot in the server's array `A`; `TableIndex` is a slot
//! in the lookup table `T`. Both live in `[0, M)` for whatever table size
//! `M` the index was built with, and both serialize to the 4-byte
//! big-endian layout the wire format (spec §3, §6) specifies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeAddress(u32);

impl NodeAddress {
    pub fn new(addr: u32, table_size: u32) -> Result<Self, SseError> {
        if addr >= table_size {
            return Err(SseError::Protocol(format!(
                "address {addr} out of range [0, {table_size})"
            )));
        }
        Ok(Self(addr))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parses a 4-byte big-endian address, as stored in a node's `ptr`
    /// field once hex-decoded.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, SseError> {
        let arr: [u8; 4] = bytes
            .try_into()
            .map_err(|_| SseError::CorruptedNode("address must be 4 bytes".into()))?;
        Ok(Self(u32::from_be_bytes(arr)))
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableIndex(u32);

impl TableIndex {
    pub fn new(idx: u32, table_size: u32) -> Result<Self, SseError> {
        if idx >= table_size {
            return Err(SseError::Protocol(format!(
                "table index {idx} out of range [0, {table_size})"
            )));
        }
        Ok(Self(idx))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_round_trips_through_bytes() {
        let addr = NodeAddress::new(12345, 32_749).unwrap();
        let bytes = addr.to_be_bytes();
        assert_eq!(NodeAddress::from_be_bytes(&bytes).unwrap(), addr);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(NodeAddress::new(32_749, 32_749).is_err());
        assert!(TableIndex::new(32_749, 32_749).is_err());
    }
}
