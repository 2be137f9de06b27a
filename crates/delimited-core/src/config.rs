//! Parser and serializer configuration.
//!
//! [`ParserConfig`] drives the tokenizer and the collector; [`QuotingRule`]
//! drives serialization. Both derive `serde` so they can be loaded from a
//! JSON file (the CLI's `--config` flag).

use serde::{Deserialize, Serialize};

/// Date formats tried, in order, when sniffing a cell as a date.
///
/// RFC 3339 timestamps are always accepted in addition to these.
/// `%.f` also accepts a missing fractional part.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// What the collector does with a row whose width differs from the table's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Drop the row and keep going.
    #[default]
    Lenient,
    /// Stop the scan and report [`DelimitedError::RaggedRow`](crate::DelimitedError::RaggedRow).
    Strict,
}

/// Which cells get wrapped in quote characters on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotingRule {
    /// Quote every cell.
    AllFields,
    /// Quote Text and Header cells.
    AllTextFields,
    /// Quote Text and Header cells only when they contain a separator or the quote character.
    #[default]
    NecessaryTextFields,
    /// Never quote.
    None,
}

/// Character sets and switches for a single scan.
///
/// Every separator and quote setting is a *set* of characters: any member
/// acts as a separator. The first member of `row_separators` is the primary
/// row separator (CRLF is rewritten to it, and documents serialize with it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub row_separators: Vec<char>,
    pub value_separators: Vec<char>,
    pub quote_characters: Vec<char>,
    /// Quoted spans suppress separator interpretation.
    pub ignore_quoted_separators: bool,
    /// Rewrite `\r\n` to the primary row separator before scanning.
    pub normalize_crlf: bool,
    /// `chrono` format strings tried when sniffing dates.
    pub date_formats: Vec<String>,
    pub row_policy: RowPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            row_separators: vec!['\n', '\r'],
            value_separators: vec![','],
            quote_characters: vec!['"'],
            ignore_quoted_separators: true,
            normalize_crlf: true,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            row_policy: RowPolicy::Lenient,
        }
    }
}

impl ParserConfig {
    pub fn with_value_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.value_separators = separators.into_iter().collect();
        self
    }

    pub fn with_row_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.row_separators = separators.into_iter().collect();
        self
    }

    pub fn with_quote_characters(mut self, quotes: impl IntoIterator<Item = char>) -> Self {
        self.quote_characters = quotes.into_iter().collect();
        self
    }

    pub fn with_quoted_separators_ignored(mut self, ignore: bool) -> Self {
        self.ignore_quoted_separators = ignore;
        self
    }

    pub fn with_crlf_normalized(mut self, normalize: bool) -> Self {
        self.normalize_crlf = normalize;
        self
    }

    /// Replace the date formats. An empty list disables date sniffing
    /// (RFC 3339 is still recognized).
    pub fn with_date_formats<S: Into<String>>(mut self, formats: impl IntoIterator<Item = S>) -> Self {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// The primary row separator, if any row separator is configured.
    pub fn primary_row_separator(&self) -> Option<char> {
        self.row_separators.first().copied()
    }

    /// The primary value separator, if any value separator is configured.
    pub fn primary_value_separator(&self) -> Option<char> {
        self.value_separators.first().copied()
    }

    /// The primary quote character, if any quote character is configured.
    pub fn primary_quote(&self) -> Option<char> {
        self.quote_characters.first().copied()
    }

    /// Every character the tokenizer gives meaning to: all value separators,
    /// all row separators and all quote characters, in that order.
    pub fn reserved_characters(&self) -> Vec<char> {
        let mut reserved = Vec::with_capacity(
            self.value_separators.len() + self.row_separators.len() + self.quote_characters.len(),
        );
        for c in self
            .value_separators
            .iter()
            .chain(&self.row_separators)
            .chain(&self.quote_characters)
        {
            if !reserved.contains(c) {
                reserved.push(*c);
            }
        }
        reserved
    }
}
