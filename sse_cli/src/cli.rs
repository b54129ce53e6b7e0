// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! A `clap`-derived CLI reproducing the scheme's three verbs (spec §6):
//! `build` a secure index from a corpus directory, `search` it with a
//! keyword, and `reveal` a matched document. Scaled down from the
//! teacher's bootstrap CLI: no async runtime, no signal handling, no
//! platform abstraction — each subcommand runs to completion and exits,
//! the way the scheme's single-threaded, non-suspending design (spec §5)
//! expects.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use sse_domain::{DocumentId, Keyword, SseError};
use sse_engine::client::{Client, ExportedKeys};
use sse_engine::config::IndexConfig;
use sse_engine::documents;
use sse_engine::server::Server;
use sse_engine::storage::InMemoryIndexStore;

use crate::ingest;

#[derive(Parser)]
#[command(name = "sse")]
#[command(about = "Searchable symmetric encryption demo (Curtmola et al. SSE-1)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug-level logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a corpus directory, build the encrypted index, and persist
    /// the index, the encrypted documents, and the client keys.
    Build {
        /// Directory of plaintext `*.txt` documents carrying `Disease:` lines.
        #[arg(long)]
        corpus: PathBuf,
        /// Output directory for `index/`, `documents/`, and `client.key`.
        #[arg(long)]
        out: PathBuf,
        /// Table size `M`. Must be prime; defaults to the small-corpus size.
        #[arg(long)]
        table_size: Option<u32>,
    },
    /// Issue a trapdoor for `keyword` and print the matching document ids.
    Search {
        /// Output directory produced by `build`.
        #[arg(long)]
        index: PathBuf,
        keyword: String,
    },
    /// Decrypt and print one document by id.
    Reveal {
        /// Output directory produced by `build`.
        #[arg(long)]
        index: PathBuf,
        doc_id: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sse(#[from] SseError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

const CLIENT_KEY_FILE: &str = "client.key";
const META_FILE: &str = "meta.json";
const INDEX_DIR: &str = "index";
const DOCUMENTS_DIR: &str = "documents";

/// Dispatches a parsed [`Cli`] to the matching subcommand handler.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Build {
            corpus,
            out,
            table_size,
        } => run_build(&corpus, &out, table_size),
        Commands::Search { index, keyword } => run_search(&index, &keyword),
        Commands::Reveal { index, doc_id } => run_reveal(&index, &doc_id),
    }
}

fn run_build(corpus: &Path, out: &Path, table_size: Option<u32>) -> Result<(), CliError> {
    let (documents_plain, keywords_map) = ingest::load_documents_and_keywords(corpus)?;

    let mut config = IndexConfig::default();
    if let Some(size) = table_size {
        config.table_size = size;
    }
    config.validate()?;

    let mut client = Client::new();
    let store = client.build_secure_index(&keywords_map, &config)?;
    info!(documents = documents_plain.len(), "corpus ingested and index built");

    let index_dir = out.join(INDEX_DIR);
    store.save(&index_dir)?;

    let meta_json = serde_json::to_vec_pretty(&config).map_err(|e| CliError::Other(e.to_string()))?;
    fs::write(index_dir.join(META_FILE), meta_json)?;

    let encrypted = client.encrypt_documents(&documents_plain);
    documents::write_documents(&out.join(DOCUMENTS_DIR), &encrypted)?;

    let key_json = serde_json::to_vec(&client.export_keys()).map_err(|e| CliError::Other(e.to_string()))?;
    fs::write(out.join(CLIENT_KEY_FILE), key_json)?;

    println!(
        "built index: {} documents, {} keywords, table size {}",
        documents_plain.len(),
        keywords_map.len(),
        config.table_size
    );
    Ok(())
}

fn run_search(out: &Path, keyword: &str) -> Result<(), CliError> {
    let client = load_client(out)?;
    let config = load_meta(out)?;
    let store = InMemoryIndexStore::load(&out.join(INDEX_DIR), config.table_size)?;

    let keyword = Keyword::new(keyword)?;
    let trapdoor = client.trapdoor(&keyword, config.table_size)?;

    let server = Server::new(&store);
    let results = server.search(&trapdoor);

    if results.is_empty() {
        println!("no matches");
    } else {
        for id in &results {
            println!("{id}");
        }
    }
    Ok(())
}

fn run_reveal(out: &Path, doc_id: &str) -> Result<(), CliError> {
    let client = load_client(out)?;
    let id = DocumentId::new(doc_id)?;
    let ciphertext = documents::read_document(&out.join(DOCUMENTS_DIR), &id)?;
    let plaintext = client.decrypt_document(&ciphertext)?;
    println!("{plaintext}");
    Ok(())
}

fn load_client(out: &Path) -> Result<Client, CliError> {
    let bytes = fs::read(out.join(CLIENT_KEY_FILE))?;
    let keys: ExportedKeys = serde_json::from_slice(&bytes).map_err(|e| CliError::Other(e.to_string()))?;
    Ok(Client::from_exported(keys))
}

fn load_meta(out: &Path) -> Result<IndexConfig, CliError> {
    let bytes = fs::read(out.join(INDEX_DIR).join(META_FILE))?;
    serde_json::from_slice(&bytes).map_err(|e| CliError::Other(e.to_string()))
}
