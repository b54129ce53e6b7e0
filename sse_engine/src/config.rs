// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Index Configuration
//!
//! Build-time constants that must match between client and server (spec
//! §6): the table size `M` (a prime, sized to the expected posting count)
//! and the load-factor guard the builder refuses to exceed.
//!
//! Loaded the way the teacher's infrastructure layer loads configuration:
//! defaults, overridable by a TOML file and `SSE_`-prefixed environment
//! variables, validated once at load time rather than at every use site.

use serde::{Deserialize, Serialize};

use sse_domain::SseError;

/// Small-corpus table size used by the reference scheme.
pub const SMALL_TABLE_SIZE: u32 = 32_749;
/// Large-corpus table size used by the reference scheme.
pub const LARGE_TABLE_SIZE: u32 = 500_009;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// `M`: the address space size for both `A` and `T`. Must be prime.
    pub table_size: u32,
    /// Build refuses to proceed once `Σ|postings| / table_size` exceeds
    /// this fraction (spec §4.2 recommends 0.9 as the hard refusal point,
    /// 0.5 as the comfortable operating point).
    pub max_load_factor: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            table_size: SMALL_TABLE_SIZE,
            max_load_factor: 0.9,
        }
    }
}

impl IndexConfig {
    /// Loads configuration layering defaults, an optional TOML file, and
    /// `SSE_`-prefixed environment variable overrides, then validates it.
    pub fn load(config_path: Option<&str>) -> Result<Self, SseError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("table_size", defaults.table_size)
            .map_err(|e| SseError::Protocol(format!("invalid default config: {e}")))?
            .set_default("max_load_factor", defaults.max_load_factor)
            .map_err(|e| SseError::Protocol(format!("invalid default config: {e}")))?;

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("SSE"));

        let settings = builder
            .build()
            .map_err(|e| SseError::Protocol(format!("failed to load config: {e}")))?;
        let config: IndexConfig = settings
            .try_deserialize()
            .map_err(|e| SseError::Protocol(format!("failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SseError> {
        if self.table_size < 2 || !is_prime(self.table_size) {
            return Err(SseError::Protocol(format!(
                "table_size {} must be prime",
                self.table_size
            )));
        }
        if !(0.0 < self.max_load_factor && self.max_load_factor <= 1.0) {
            return Err(SseError::Protocol(format!(
                "max_load_factor {} must be in (0, 1]",
                self.max_load_factor
            )));
        }
        Ok(())
    }
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u32;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
