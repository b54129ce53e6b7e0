// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Logger
//!
//! Initializes the global `tracing` subscriber the rest of the process
//! logs through — `sse_engine`'s `#[instrument]` spans and this crate's
//! own `info!`/`error!` calls both end up here. `--verbose` is the only
//! knob exposed at the CLI; finer control is left to `RUST_LOG`.

use tracing::Level;

/// Installs the process-wide subscriber. Must run before any other
/// `tracing` call; the CLI's `main` does this first, before dispatching
/// to a subcommand.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("global tracing subscriber already set");
}
