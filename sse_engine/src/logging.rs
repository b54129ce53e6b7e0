// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Engine Logging
//!
//! The engine emits structured `tracing` events rather than formatting
//! strings itself ([`crate::client::Client::build_secure_index`] and
//! [`crate::server::Server::search`] carry `#[instrument]` spans
//! directly); this module only fixes the field names those call sites
//! share, so a log aggregator sees consistent keys across build and
//! search operations regardless of which subcommand produced them.

/// Field name for the keyword count of an index under construction.
pub const FIELD_KEYWORDS: &str = "keywords";
/// Field name for the total posting count across all keywords.
pub const FIELD_POSTINGS: &str = "postings";
/// Field name for the configured table size `M`.
pub const FIELD_TABLE_SIZE: &str = "table_size";
