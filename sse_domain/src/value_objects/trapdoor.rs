// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Trapdoor Value Object
//!
//! A trapdoor `t = (index, mask)` is the only thing the client ever sends
//! the server to run a search. It is deterministic in the keyword: the
//! same keyword always yields the same trapdoor (spec §4.3), which is the
//! accepted query-equality leakage of SSE-1, not a bug to be fixed here.

use serde::{Deserialize, Serialize};

use super::node_address::TableIndex;
use crate::error::SseError;

pub const MASK_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trapdoor {
    pub index: TableIndex,
    pub mask: [u8; MASK_LEN],
}

impl Trapdoor {
    pub fn new(index: TableIndex, mask: Vec<u8>) -> Result<Self, SseError> {
        let mask: [u8; MASK_LEN] = mask
            .try_into()
            .map_err(|v: Vec<u8>| SseError::Protocol(format!("mask must be {MASK_LEN} bytes, got {}", v.len())))?;
        Ok(Self { index, mask })
    }
}
