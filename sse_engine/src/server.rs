// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Server Search
//!
//! The server holds `(A, T)` and nothing else — no keys, no plaintext
//! keywords, no document bodies. Given a trapdoor it unmasks one `T`
//! entry, then walks the chain in `A` decrypting each node with the key
//! its predecessor handed it.
//!
//! ## Leakage collapse (spec §7)
//!
//! A forged trapdoor and a trapdoor for a keyword nobody indexed are made
//! indistinguishable here: both return an empty `Vec` rather than an
//! error, so the server (and anyone observing it) learns only "this
//! trapdoor unmasked to an empty result" and nothing about which of the
//! two actually happened. A decrypt failure or malformed node (the named
//! `CryptoError`/`CorruptedNodeError` kinds) collapses the whole search to
//! empty the same way. A missing mid-chain node is ordinary loop
//! termination, not one of those kinds: the chain simply ends early, and
//! whatever document ids were already collected are still returned.

use tracing::{instrument, warn};

use sse_domain::crypto::ske_decrypt;
use sse_domain::node::{IndexNode, NodePointer};
use sse_domain::{DocumentId, IndexStore, NodeAddress, Trapdoor};

pub struct Server<'a, S: IndexStore> {
    store: &'a S,
}

impl<'a, S: IndexStore> Server<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Runs one search. Caps chain traversal at `table_size` iterations so
    /// a corrupted or adversarial cycle in `A` cannot hang the server
    /// (spec §7 edge case: cyclic `ptr` chain).
    #[instrument(skip(self, trapdoor))]
    pub fn search(&self, trapdoor: &Trapdoor) -> Vec<DocumentId> {
        let table_size = self.store.table_size();
        let masked = match self.store.get_table_entry(trapdoor.index) {
            Some(entry) => entry,
            None => return Vec::new(),
        };

        let mut entry = [0u8; 20];
        for i in 0..20 {
            entry[i] = masked[i] ^ trapdoor.mask[i];
        }
        let (addr_bytes, key_bytes) = entry.split_at(4);
        let first_addr = u32::from_be_bytes(addr_bytes.try_into().expect("split_at(4) yields 4 bytes"));

        let mut results = Vec::new();
        let mut next_addr = match NodeAddress::new(first_addr, table_size) {
            Ok(addr) => Some(addr),
            Err(_) => return Vec::new(),
        };
        let mut next_key: [u8; 16] = key_bytes.try_into().expect("split_at(4) leaves 16 bytes");

        let mut steps = 0u32;
        while let Some(addr) = next_addr {
            if steps >= table_size {
                warn!(steps, "search aborted: chain length reached table size");
                return Vec::new();
            }
            steps += 1;

            let ciphertext = match self.store.get_node(addr) {
                Some(bytes) => bytes,
                None => break,
            };
            let plaintext = match ske_decrypt(&next_key, ciphertext) {
                Ok(p) => p,
                Err(_) => return Vec::new(),
            };
            let node = match IndexNode::from_json_bytes(&plaintext) {
                Ok(n) => n,
                Err(_) => return Vec::new(),
            };

            results.push(node.id);
            next_key = *node.next_key.as_bytes();
            next_addr = match node.ptr {
                NodePointer::Next(a) => Some(a),
                NodePointer::Null => None,
            };
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use sse_domain::crypto::{prf_bytes, ske_encrypt};
    use sse_domain::{ClientKey, Keyword, TableIndex};

    use super::*;
    use crate::client::Client;
    use crate::config::IndexConfig;
    use crate::storage::{InMemoryIndexStore, TABLE_ENTRY_LEN};

    fn kw(s: &str) -> Keyword {
        Keyword::new(s).unwrap()
    }
    fn doc(s: &str) -> DocumentId {
        DocumentId::new(s).unwrap()
    }

    #[test]
    fn finds_documents_for_a_shared_keyword() {
        let mut client = Client::new();
        let config = IndexConfig {
            table_size: 101,
            max_load_factor: 0.9,
        };
        let map = vec![
            (doc("doc1"), vec![kw("cancer")]),
            (doc("doc2"), vec![kw("cancer")]),
        ];
        let store = client.build_secure_index(&map, &config).unwrap();
        let trapdoor = client.trapdoor(&kw("cancer"), config.table_size).unwrap();

        let server = Server::new(&store);
        let mut results = server.search(&trapdoor);
        results.sort();
        assert_eq!(results, vec![doc("doc1"), doc("doc2")]);
    }

    #[test]
    fn unindexed_keyword_returns_empty() {
        let mut client = Client::new();
        let config = IndexConfig {
            table_size: 101,
            max_load_factor: 0.9,
        };
        let map = vec![(doc("doc1"), vec![kw("cancer")])];
        let store = client.build_secure_index(&map, &config).unwrap();
        let trapdoor = client.trapdoor(&kw("diabetes"), config.table_size).unwrap();

        let server = Server::new(&store);
        assert!(server.search(&trapdoor).is_empty());
    }

    #[test]
    fn forged_trapdoor_returns_empty_not_an_error() {
        let mut client = Client::new();
        let config = IndexConfig {
            table_size: 101,
            max_load_factor: 0.9,
        };
        let map = vec![(doc("doc1"), vec![kw("cancer")])];
        let store = client.build_secure_index(&map, &config).unwrap();

        let forged = Trapdoor::new(TableIndex::new(3, config.table_size).unwrap(), vec![0u8; 20]).unwrap();
        let server = Server::new(&store);
        assert!(server.search(&forged).is_empty());
    }

    #[test]
    fn disjoint_keywords_do_not_cross_contaminate() {
        let mut client = Client::new();
        let config = IndexConfig {
            table_size: 101,
            max_load_factor: 0.9,
        };
        let map = vec![
            (doc("doc1"), vec![kw("cancer")]),
            (doc("doc2"), vec![kw("diabetes")]),
        ];
        let store = client.build_secure_index(&map, &config).unwrap();
        let server = Server::new(&store);

        let t1 = client.trapdoor(&kw("cancer"), config.table_size).unwrap();
        let t2 = client.trapdoor(&kw("diabetes"), config.table_size).unwrap();
        assert_eq!(server.search(&t1), vec![doc("doc1")]);
        assert_eq!(server.search(&t2), vec![doc("doc2")]);
    }

    #[test]
    fn multi_keyword_document_is_reachable_from_each_keyword() {
        let mut client = Client::new();
        let config = IndexConfig {
            table_size: 101,
            max_load_factor: 0.9,
        };
        let map = vec![(doc("doc1"), vec![kw("cancer"), kw("diabetes")])];
        let store = client.build_secure_index(&map, &config).unwrap();
        let server = Server::new(&store);

        let t1 = client.trapdoor(&kw("cancer"), config.table_size).unwrap();
        let t2 = client.trapdoor(&kw("diabetes"), config.table_size).unwrap();
        assert_eq!(server.search(&t1), vec![doc("doc1")]);
        assert_eq!(server.search(&t2), vec![doc("doc1")]);
    }

    #[test]
    fn missing_mid_chain_node_returns_partial_results_not_empty() {
        // Hand-builds a two-node chain and deliberately never stores the
        // second node, simulating the "node not found" case directly
        // rather than through `Client::build_secure_index` (which never
        // produces a dangling `ptr`).
        let table_size = 101;
        let mut store = InMemoryIndexStore::new(table_size);

        let addr_head = NodeAddress::new(5, table_size).unwrap();
        let addr_missing = NodeAddress::new(6, table_size).unwrap();
        let key_head = ClientKey::random();
        let key_next = ClientKey::random();

        let head_node = IndexNode {
            id: doc("doc1"),
            next_key: key_next.clone(),
            ptr: NodePointer::Next(addr_missing),
        };
        let ciphertext = ske_encrypt(key_head.as_bytes(), &head_node.to_json_bytes());
        store.set_node(addr_head, ciphertext);
        // addr_missing's node is never written.

        let mut entry_plain = [0u8; TABLE_ENTRY_LEN];
        entry_plain[0..4].copy_from_slice(&addr_head.to_be_bytes());
        entry_plain[4..20].copy_from_slice(key_head.as_bytes());

        let index = TableIndex::new(3, table_size).unwrap();
        let mask = prf_bytes(b"0123456789abcdef", "x", TABLE_ENTRY_LEN);
        let mut masked = [0u8; TABLE_ENTRY_LEN];
        for i in 0..TABLE_ENTRY_LEN {
            masked[i] = entry_plain[i] ^ mask[i];
        }
        store.set_table_entry(index, masked);

        let trapdoor = Trapdoor::new(index, mask).unwrap();
        let server = Server::new(&store);
        assert_eq!(server.search(&trapdoor), vec![doc("doc1")]);
    }
}
