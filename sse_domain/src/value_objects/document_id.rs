// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Document Identifier Value Object
//!
//! A document identifier as it appears in a keyword posting list and in a
//! chain node's `id` field. The core treats this as an opaque, non-empty
//! string — it never interprets it as a file path.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::SseError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Result<Self, SseError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SseError::Protocol("document id must not be empty".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(DocumentId::new("").is_err());
    }

    #[test]
    fn accepts_nonempty() {
        assert_eq!(DocumentId::new("doc1.txt").unwrap().as_str(), "doc1.txt");
    }
}
