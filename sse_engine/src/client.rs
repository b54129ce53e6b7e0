// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Client
//!
//! The client holds the four secret keys, the monotonic address counter,
//! and the operations that only someone holding the keys can perform:
//! building the encrypted index, issuing a trapdoor for a keyword, and
//! encrypting/decrypting documents. None of this ever touches the
//! network — `A`, `T`, trapdoors, and encrypted documents are the only
//! things that cross the client/server boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use sse_domain::crypto::{prf_bytes, prf_int, ske_decrypt};
use sse_domain::node::{IndexNode, NodePointer};
use sse_domain::{ClientKey, DocumentId, Keyword, NodeAddress, SseError, TableIndex, Trapdoor};

use crate::config::IndexConfig;
use crate::documents::encrypt_document;
use crate::storage::{InMemoryIndexStore, TABLE_ENTRY_LEN};

pub struct Client {
    k1: ClientKey, // addresses in A
    k2: ClientKey, // masks for T
    k3: ClientKey, // indices into T
    k4: ClientKey, // document payload key
    counter: u64,
}

/// The four keys, serialized for handoff between CLI invocations of
/// `build`, `search`, and `reveal` — each process run is a fresh
/// `Client`, so the keys it needs to reuse must cross a file boundary.
/// This is a demo-harness convenience, not part of the scheme itself
/// (spec §5: key custody is the caller's concern, not the core's).
#[derive(Serialize, Deserialize)]
pub struct ExportedKeys {
    k1: ClientKey,
    k2: ClientKey,
    k3: ClientKey,
    k4: ClientKey,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self {
            k1: ClientKey::random(),
            k2: ClientKey::random(),
            k3: ClientKey::random(),
            k4: ClientKey::random(),
            counter: 1,
        }
    }

    /// Exports the four keys for persistence. The address counter is not
    /// included: it only matters mid-build, and `search`/`reveal` never
    /// call [`Self::build_secure_index`].
    pub fn export_keys(&self) -> ExportedKeys {
        ExportedKeys {
            k1: self.k1.clone(),
            k2: self.k2.clone(),
            k3: self.k3.clone(),
            k4: self.k4.clone(),
        }
    }

    /// Rebuilds a client from previously exported keys. The counter
    /// restarts at 1, which is only safe because the returned client is
    /// never used to extend an existing index — only to issue trapdoors
    /// or decrypt documents.
    pub fn from_exported(keys: ExportedKeys) -> Self {
        Self {
            k1: keys.k1,
            k2: keys.k2,
            k3: keys.k3,
            k4: keys.k4,
            counter: 1,
        }
    }

    /// Builds the encrypted index `(A, T)` from `keywords_map`.
    ///
    /// Iteration order is fixed to the caller's insertion order for both
    /// documents and each document's keyword list (spec §4.2 step 1); a
    /// keyword's posting list is therefore the order in which documents
    /// naming it first appear in `keywords_map`.
    ///
    /// Uses the two-pass allocator spec §4.2/§9 recommends over the
    /// source's peek-ahead probe: for each keyword, reserve all `n`
    /// addresses first (so every node's `ptr` is known before that node
    /// is serialized), then encrypt and store the nodes back-to-front.
    #[instrument(skip(self, keywords_map))]
    pub fn build_secure_index(
        &mut self,
        keywords_map: &[(DocumentId, Vec<Keyword>)],
        config: &IndexConfig,
    ) -> Result<InMemoryIndexStore, SseError> {
        let inverted = invert_preserving_order(keywords_map);

        let total_postings: usize = inverted.iter().map(|(_, docs)| docs.len()).sum();
        if total_postings as f64 > config.max_load_factor * config.table_size as f64 {
            return Err(SseError::IndexCapacity(format!(
                "{total_postings} postings exceed {} of table size {}",
                config.max_load_factor, config.table_size
            )));
        }

        info!(
            keywords = inverted.len(),
            postings = total_postings,
            table_size = config.table_size,
            "building secure index"
        );

        // InMemoryIndexStore::new pre-fills every one of the M table slots
        // with random bytes, so keywords with no chain still read back as
        // indistinguishable noise (spec §4.2 step 3 / §9 Open Question 3) —
        // no separate padding pass is needed once every chain is built.
        let mut store = InMemoryIndexStore::new(config.table_size);

        for (keyword, doc_ids) in &inverted {
            self.build_chain(&mut store, keyword, doc_ids, config.table_size)?;
        }

        Ok(store)
    }

    fn build_chain(
        &mut self,
        store: &mut InMemoryIndexStore,
        keyword: &Keyword,
        doc_ids: &[DocumentId],
        table_size: u32,
    ) -> Result<(), SseError> {
        let n = doc_ids.len();
        debug_assert!(n > 0, "inverted postings are never empty");

        // Pass 1: reserve every address this chain needs before any node
        // is serialized, so `ptr` fields never depend on a temporary probe.
        let mut addrs = Vec::with_capacity(n);
        for _ in 0..n {
            addrs.push(self.allocate_address(store, table_size));
        }

        // Pass 2: fill node contents, each encrypted under the key its
        // predecessor will hand out.
        let k_head = ClientKey::random();
        let mut k_prev = k_head.clone();
        for (j, doc_id) in doc_ids.iter().enumerate() {
            let (next_key, ptr) = if j + 1 < n {
                (ClientKey::random(), NodePointer::Next(addrs[j + 1]))
            } else {
                (ClientKey::zero(), NodePointer::Null)
            };

            let node = IndexNode {
                id: doc_id.clone(),
                next_key: next_key.clone(),
                ptr,
            };
            let ciphertext =
                sse_domain::crypto::ske_encrypt(k_prev.as_bytes(), &node.to_json_bytes());
            store.set_node(addrs[j], ciphertext);

            k_prev = next_key;
        }

        let addr_first = addrs[0];
        let mut entry_plain = [0u8; TABLE_ENTRY_LEN];
        entry_plain[0..4].copy_from_slice(&addr_first.to_be_bytes());
        entry_plain[4..20].copy_from_slice(k_head.as_bytes());

        let mask = prf_bytes(self.k2.as_bytes(), keyword.as_str(), TABLE_ENTRY_LEN);
        let mut masked = [0u8; TABLE_ENTRY_LEN];
        for i in 0..TABLE_ENTRY_LEN {
            masked[i] = entry_plain[i] ^ mask[i];
        }

        let raw_index = prf_int(self.k3.as_bytes(), keyword.as_str()).reduce_mod(table_size);
        let index = TableIndex::new(raw_index, table_size)?;
        store.set_table_entry(index, masked);

        debug!(keyword = %keyword, chain_len = n, first_addr = %addr_first, "built keyword chain");
        Ok(())
    }

    /// Probes the counter-derived address sequence starting at the
    /// current counter, committing the first free slot and leaving the
    /// counter one past it (spec §4.2: "Commit that `addr`, set the
    /// counter to `c`" plus the per-node increment in the source).
    fn allocate_address(&mut self, store: &mut InMemoryIndexStore, table_size: u32) -> NodeAddress {
        loop {
            let candidate = prf_int(self.k1.as_bytes(), &self.counter.to_string()).reduce_mod(table_size);
            self.counter += 1;
            if !store.is_occupied(candidate) {
                store.reserve(candidate);
                return NodeAddress::new(candidate, table_size)
                    .expect("reduce_mod always yields a value in [0, table_size)");
            }
        }
    }

    /// `trapdoor(w) = (π_K3(w), f_K2(w))` — deterministic in `w`; repeated
    /// queries for the same keyword are the accepted leakage of SSE-1.
    pub fn trapdoor(&self, keyword: &Keyword, table_size: u32) -> Result<Trapdoor, SseError> {
        let raw_index = prf_int(self.k3.as_bytes(), keyword.as_str()).reduce_mod(table_size);
        let index = TableIndex::new(raw_index, table_size)?;
        let mask = prf_bytes(self.k2.as_bytes(), keyword.as_str(), TABLE_ENTRY_LEN);
        Trapdoor::new(index, mask)
    }

    pub fn encrypt_documents(
        &self,
        documents: &HashMap<DocumentId, String>,
    ) -> HashMap<DocumentId, Vec<u8>> {
        documents
            .iter()
            .map(|(id, content)| (id.clone(), encrypt_document(&self.k4, content.as_bytes())))
            .collect()
    }

    pub fn decrypt_document(&self, ciphertext: &[u8]) -> Result<String, SseError> {
        let plaintext = ske_decrypt(self.k4.as_bytes(), ciphertext)?;
        String::from_utf8(plaintext).map_err(|e| SseError::Crypto(format!("document is not valid utf-8: {e}")))
    }
}

/// Inverts `doc_id -> [keyword]` to `keyword -> [doc_id]`, preserving the
/// order in which each keyword is first seen and the order documents are
/// appended to its posting list (spec §4.2 step 1).
fn invert_preserving_order(keywords_map: &[(DocumentId, Vec<Keyword>)]) -> Vec<(Keyword, Vec<DocumentId>)> {
    let mut order: Vec<Keyword> = Vec::new();
    let mut index_of: HashMap<Keyword, usize> = HashMap::new();
    let mut postings: Vec<Vec<DocumentId>> = Vec::new();

    for (doc_id, keywords) in keywords_map {
        for keyword in keywords {
            let idx = *index_of.entry(keyword.clone()).or_insert_with(|| {
                order.push(keyword.clone());
                postings.push(Vec::new());
                postings.len() - 1
            });
            postings[idx].push(doc_id.clone());
        }
    }

    order.into_iter().zip(postings).collect()
}
