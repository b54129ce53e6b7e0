// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Bootstrap
//!
//! The thin entry-point layer: argument parsing and logger bootstrap.
//! Sits outside [`sse_engine`] the way the teacher's bootstrap module
//! sits outside its application layers — it wires subcommands to engine
//! calls and maps [`sse_domain::SseError`] to process exit codes, but
//! holds no domain logic of its own.
//!
//! ## Module Structure
//!
//! - `cli` — clap-derived argument parsing and subcommand dispatch
//! - `logger` — `tracing` subscriber bootstrap

pub mod cli;
pub mod ingest;
pub mod logger;

pub use cli::{run, Cli, Commands};
