//! Find delimited tables embedded in larger text, and load them from files.
//!
//! A table region is a maximal run of lines that each contain at least one
//! value separator:
//!
//! ```text
//! (?:(?:[^RV]+[V])+[^R]+[R]?)+      R = row separators, V = value separators
//! ```
//!
//! Matches never overlap; each one is parsed on its own with the same
//! configuration.

use std::ops::Range;
use std::path::Path;

use regex::Regex;

use crate::config::ParserConfig;
use crate::document::Document;
use crate::error::{DelimitedError, Result};

/// Parse every table region found in `text`, optionally restricted to the byte
/// range `range`.
pub fn extract_documents(
    text: &str,
    range: Option<Range<usize>>,
    config: &ParserConfig,
) -> Result<Vec<Document>> {
    let haystack = match range {
        Some(range) => text.get(range.clone()).ok_or(DelimitedError::InvalidRange {
            start: range.start,
            end: range.end,
            len: text.len(),
        })?,
        None => text,
    };
    if config.value_separators.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = region_pattern(config)?;
    let documents = pattern
        .find_iter(haystack)
        .map(|region| Document::parse_with(region.as_str(), config))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = documents.len(), "extracted documents");
    Ok(documents)
}

/// Read `path` and extract every table in it.
pub fn load_documents(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DelimitedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_documents(&text, None, config)
}

/// Like [`load_documents`], but any failure is logged and yields no documents.
pub fn load_documents_or_empty(path: impl AsRef<Path>, config: &ParserConfig) -> Vec<Document> {
    let path = path.as_ref();
    match load_documents(path, config) {
        Ok(documents) => documents,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not load documents");
            Vec::new()
        }
    }
}

fn region_pattern(config: &ParserConfig) -> Result<Regex> {
    let rows = char_class(&config.row_separators);
    let values = char_class(&config.value_separators);
    let pattern = if rows.is_empty() {
        // No row breaks: a region is a single run of separated fields.
        format!("(?:[^{values}]+[{values}])+[^{values}]*")
    } else {
        format!("(?:(?:[^{rows}{values}]+[{values}])+[^{rows}]+[{rows}]?)+")
    };
    Ok(Regex::new(&pattern)?)
}

/// Escaped contents for a `[...]` character class.
fn char_class(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect()
}
