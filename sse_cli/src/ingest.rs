// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Keyword Extraction Adapter
//!
//! Turns a directory of plaintext documents into the `(DocumentId,
//! Vec<Keyword>)` pairs `sse_engine::client::Client::build_secure_index`
//! needs. This is the δ(D) phase of the scheme: it runs entirely before
//! encryption, over plaintext the client already holds, and lives here
//! rather than in `sse_engine` or `sse_domain` — the core is neutral to
//! where keywords came from; it only ever consumes the resulting map.
//!
//! Keywords are read from the first `Disease:` line of a document, comma
//! separated and lower-cased — the loader never case-folds a keyword it
//! wasn't told to, so two documents naming "Cancer" and "cancer" collide
//! into the same posting list only because this adapter normalizes them,
//! not because `sse_domain::value_objects::Keyword` does.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use sse_domain::{DocumentId, Keyword, SseError};

const DISEASE_PREFIX: &str = "disease:";

/// Reads every `*.txt` file in `dir`, extracts its keywords, and returns
/// both the raw document bodies and the `(id, keywords)` pairs ready for
/// `Client::build_secure_index`. Non-`.txt` entries (directories, stray
/// dotfiles, anything else sitting in the corpus directory) are skipped.
///
/// A file with no `Disease:` line contributes no keywords but is still
/// encrypted and stored — it is simply unreachable from any search.
pub fn load_documents_and_keywords(
    dir: &Path,
) -> Result<(HashMap<DocumentId, String>, Vec<(DocumentId, Vec<Keyword>)>), SseError> {
    let mut documents = HashMap::new();
    let mut keywords_map = Vec::new();

    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| SseError::Io(e.to_string()))?
        .collect::<Result<_, _>>()
        .map_err(|e| SseError::Io(e.to_string()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SseError::Io(format!("{}: non-utf8 file name", path.display())))?
            .to_string();

        let content = fs::read_to_string(&path).map_err(|e| SseError::Io(format!("{}: {e}", path.display())))?;
        let id = DocumentId::new(file_name.clone())?;

        let keywords = extract_keywords(&content);
        if keywords.is_empty() {
            warn!(document = %file_name, "no Disease: line found, document has no keywords");
        }

        documents.insert(id.clone(), content);
        keywords_map.push((id, keywords));
    }

    Ok((documents, keywords_map))
}

/// Extracts keywords from the first line starting with `disease:`
/// (case-insensitive), splitting its value on commas and lower-casing
/// and trimming each piece.
fn extract_keywords(content: &str) -> Vec<Keyword> {
    for line in content.lines() {
        if let Some(rest) = strip_prefix_case_insensitive(line, DISEASE_PREFIX) {
            return rest
                .split(',')
                .map(|piece| piece.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .filter_map(|s| Keyword::new(s).ok())
                .collect();
        }
    }
    Vec::new()
}

fn strip_prefix_case_insensitive<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    if line.len() >= prefix.len() && line[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_comma_separated_lowercased_keywords() {
        let content = "Some intro text\nDisease: Cancer, Diabetes\nmore text";
        let keywords = extract_keywords(content);
        assert_eq!(
            keywords,
            vec![Keyword::new("cancer").unwrap(), Keyword::new("diabetes").unwrap()]
        );
    }

    #[test]
    fn is_case_insensitive_on_the_prefix() {
        let content = "DISEASE: flu";
        assert_eq!(extract_keywords(content), vec![Keyword::new("flu").unwrap()]);
    }

    #[test]
    fn missing_disease_line_yields_no_keywords() {
        assert!(extract_keywords("just some prose").is_empty());
    }

    #[test]
    fn loads_directory_sorted_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "Disease: flu").unwrap();
        fs::write(dir.path().join("a.txt"), "Disease: cancer").unwrap();

        let (documents, keywords_map) = load_documents_and_keywords(dir.path()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(keywords_map[0].0, DocumentId::new("a.txt").unwrap());
        assert_eq!(keywords_map[1].0, DocumentId::new("b.txt").unwrap());
    }

    #[test]
    fn skips_non_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.txt"), "Disease: flu").unwrap();
        fs::write(dir.path().join("doc.enc"), [0xffu8, 0x00, 0x13]).unwrap();
        fs::write(dir.path().join(".hidden"), "Disease: cancer").unwrap();

        let (documents, keywords_map) = load_documents_and_keywords(dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(keywords_map.len(), 1);
        assert_eq!(keywords_map[0].0, DocumentId::new("doc.txt").unwrap());
    }
}
