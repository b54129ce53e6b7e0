// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory Index Store
//!
//! The server-visible `A`/`T` pair, held as the teacher's own sizing notes
//! for sparse-vs-dense maps recommend: `A` as a hash map from address to
//! variable-length ciphertext (sparse — only real chain nodes are present),
//! `T` as a flat array of `M` fixed-size entries (dense — every slot is
//! populated, real or padding, so its length never leaks keyword
//! cardinality).
//!
//! This is the one [`IndexStore`] implementation in the engine. It is
//! mutated only by [`crate::client::Client`] during construction; once
//! handed to [`crate::server::Server`] it is read-only and `Send + Sync`,
//! so concurrent searches are safe without extra synchronization (spec
//! §5). [`InMemoryIndexStore::save`]/[`InMemoryIndexStore::load`] persist
//! it to a pair of binary files so a built index can outlive the process
//! that built it.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use rand::RngCore;

use sse_domain::{IndexStore, NodeAddress, SseError, TableIndex};

pub const TABLE_ENTRY_LEN: usize = 20;

pub struct InMemoryIndexStore {
    table_size: u32,
    nodes: HashMap<u32, Vec<u8>>,
    table: Vec<[u8; TABLE_ENTRY_LEN]>,
    reserved: HashSet<u32>,
}

impl InMemoryIndexStore {
    /// Every slot starts filled with random bytes rather than zeros, so a
    /// keyword with no chain is indistinguishable from real masked data
    /// (spec §4.2 step 3 / §9 Open Question 3) without a separate pad pass.
    pub(crate) fn new(table_size: u32) -> Self {
        let mut table = vec![[0u8; TABLE_ENTRY_LEN]; table_size as usize];
        for entry in table.iter_mut() {
            rand::rngs::OsRng.fill_bytes(entry);
        }
        Self {
            table_size,
            nodes: HashMap::new(),
            table,
            reserved: HashSet::new(),
        }
    }

    /// True if `addr` is either already filled with a node or reserved by
    /// an in-progress allocation (spec §4.2: "Commit that `addr`").
    pub(crate) fn is_occupied(&self, addr: u32) -> bool {
        self.nodes.contains_key(&addr) || self.reserved.contains(&addr)
    }

    pub(crate) fn reserve(&mut self, addr: u32) {
        self.reserved.insert(addr);
    }

    pub(crate) fn set_node(&mut self, addr: NodeAddress, ciphertext: Vec<u8>) {
        self.reserved.remove(&addr.value());
        self.nodes.insert(addr.value(), ciphertext);
    }

    pub(crate) fn set_table_entry(&mut self, idx: TableIndex, entry: [u8; TABLE_ENTRY_LEN]) {
        self.table[idx.value() as usize] = entry;
    }

    /// Number of real (non-padding) chain nodes currently stored.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Persists `A` and `T` as `<dir>/array.bin` and `<dir>/table.bin`.
    ///
    /// `A` is a sequence of `(addr: u32 BE, len: u32 BE, ciphertext)`
    /// records — sparse, so only real chain nodes take space. `T` is the
    /// flat concatenation of its `table_size` fixed 20-byte entries in
    /// index order, so it can be read back with a single seek-free pass
    /// (spec §6: binary persistence for `A`/`T`).
    pub fn save(&self, dir: &Path) -> Result<(), SseError> {
        fs::create_dir_all(dir).map_err(|e| SseError::Io(e.to_string()))?;

        let mut array_buf = Vec::new();
        for (&addr, ciphertext) in &self.nodes {
            array_buf.extend_from_slice(&addr.to_be_bytes());
            array_buf.extend_from_slice(&(ciphertext.len() as u32).to_be_bytes());
            array_buf.extend_from_slice(ciphertext);
        }
        fs::write(dir.join("array.bin"), &array_buf).map_err(|e| SseError::Io(e.to_string()))?;

        let mut table_buf = Vec::with_capacity(self.table.len() * TABLE_ENTRY_LEN);
        for entry in &self.table {
            table_buf.extend_from_slice(entry);
        }
        fs::write(dir.join("table.bin"), &table_buf).map_err(|e| SseError::Io(e.to_string()))?;

        Ok(())
    }

    /// Loads a store previously written by [`Self::save`]. `table_size`
    /// must be supplied by the caller (spec §6: it is a configuration
    /// value shared out of band between client and server, not recovered
    /// from the file itself).
    pub fn load(dir: &Path, table_size: u32) -> Result<Self, SseError> {
        let table_bytes = fs::read(dir.join("table.bin")).map_err(|e| SseError::Io(e.to_string()))?;
        let expected_len = table_size as usize * TABLE_ENTRY_LEN;
        if table_bytes.len() != expected_len {
            return Err(SseError::Io(format!(
                "table.bin has {} bytes, expected {expected_len} for table_size {table_size}",
                table_bytes.len()
            )));
        }
        let mut table = Vec::with_capacity(table_size as usize);
        for chunk in table_bytes.chunks_exact(TABLE_ENTRY_LEN) {
            let mut entry = [0u8; TABLE_ENTRY_LEN];
            entry.copy_from_slice(chunk);
            table.push(entry);
        }

        let mut array_file = fs::File::open(dir.join("array.bin")).map_err(|e| SseError::Io(e.to_string()))?;
        let mut array_bytes = Vec::new();
        array_file
            .read_to_end(&mut array_bytes)
            .map_err(|e| SseError::Io(e.to_string()))?;

        let mut nodes = HashMap::new();
        let mut cursor = 0usize;
        while cursor < array_bytes.len() {
            if cursor + 8 > array_bytes.len() {
                return Err(SseError::Io("array.bin truncated record header".into()));
            }
            let addr = u32::from_be_bytes(array_bytes[cursor..cursor + 4].try_into().unwrap());
            let len = u32::from_be_bytes(array_bytes[cursor + 4..cursor + 8].try_into().unwrap()) as usize;
            cursor += 8;
            if cursor + len > array_bytes.len() {
                return Err(SseError::Io("array.bin truncated record body".into()));
            }
            nodes.insert(addr, array_bytes[cursor..cursor + len].to_vec());
            cursor += len;
        }

        Ok(Self {
            table_size,
            nodes,
            table,
            reserved: HashSet::new(),
        })
    }
}

impl IndexStore for InMemoryIndexStore {
    fn get_node(&self, addr: NodeAddress) -> Option<&[u8]> {
        self.nodes.get(&addr.value()).map(|v| v.as_slice())
    }

    fn get_table_entry(&self, idx: TableIndex) -> Option<&[u8; TABLE_ENTRY_LEN]> {
        self.table.get(idx.value() as usize)
    }

    fn table_size(&self) -> u32 {
        self.table_size
    }
}
