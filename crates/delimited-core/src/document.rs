//! Document: a typed table plus the settings used to write it back out.
//!
//! A [`Document`] owns a [`Matrix<Cell>`] together with a value separator, a
//! row separator, a quote character and a [`QuotingRule`]. Documents come from
//! explicit dimensions, a header row, an existing matrix, or by parsing text
//! with the [`Tokenizer`] and [`Collector`].
//!
//! # Serialization
//!
//! [`Document::to_delimited_string`] writes rows top to bottom and cells left to
//! right, separating cells with the value separator and terminating every row
//! (the last one included) with the row separator. Each cell passes through the
//! quoting rule:
//!
//! | Rule                  | Quoted cells                                               |
//! |-----------------------|------------------------------------------------------------|
//! | `AllFields`           | every cell                                                 |
//! | `AllTextFields`       | `Text` and `Header`                                        |
//! | `NecessaryTextFields` | `Text`/`Header` containing a separator, a line break, or the quote |
//! | `None`                | none                                                       |
//!
//! Quote characters inside a quoted cell are doubled, which the tokenizer reads
//! back as a single literal quote.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::cell::Cell;
use crate::collector::Collector;
use crate::config::{ParserConfig, QuotingRule};
use crate::error::{DelimitedError, Result};
use crate::matrix::Matrix;
use crate::tokenizer::Tokenizer;

const DEFAULT_VALUE_SEPARATOR: &str = ",";
const DEFAULT_ROW_SEPARATOR: &str = "\n";
const DEFAULT_QUOTE: char = '"';

/// Parse `text` into a [`Document`] using `config`.
///
/// Only fails under [`RowPolicy::Strict`](crate::RowPolicy::Strict).
pub fn parse_document(text: &str, config: &ParserConfig) -> Result<Document> {
    Document::parse_with(text, config)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    content: Matrix<Cell>,
    value_separator: String,
    row_separator: String,
    quote: char,
    quoting_rule: QuotingRule,
    // Characters the reading parser treats specially; text holding any of
    // them is quoted under `NecessaryTextFields`.
    reserved: Vec<char>,
}

impl Document {
    /// A `row_count` × `column_count` table filled with `value` (each dimension at least 1).
    pub fn new(row_count: usize, column_count: usize, value: Cell) -> Self {
        Self::from_matrix(Matrix::new(row_count, column_count, value))
    }

    /// A table whose first row holds `headers` as `Header` cells; the remaining
    /// `row_count - 1` rows are empty.
    pub fn with_headers(headers: &[Cell], row_count: usize) -> Self {
        let mut doc = Self::new(row_count, headers.len(), Cell::Empty);
        for (column, header) in headers.iter().enumerate() {
            doc.content[(0, column)] = header.header();
        }
        doc
    }

    pub fn from_matrix(content: Matrix<Cell>) -> Self {
        Self {
            content,
            value_separator: DEFAULT_VALUE_SEPARATOR.to_string(),
            row_separator: DEFAULT_ROW_SEPARATOR.to_string(),
            quote: DEFAULT_QUOTE,
            quoting_rule: QuotingRule::default(),
            reserved: ParserConfig::default().reserved_characters(),
        }
    }

    /// Parse with the default configuration (comma, newline, double quote).
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParserConfig::default())
    }

    /// Tokenize `text` and collect it into a table in one synchronous call.
    ///
    /// The document's output separators and quote are the primary members of
    /// the configured sets. Under `NecessaryTextFields`, text containing any
    /// member of those sets is quoted, so the output reads back the same way
    /// under `config`.
    pub fn parse_with(text: &str, config: &ParserConfig) -> Result<Self> {
        let mut collector = Collector::new(config);
        Tokenizer::new(config).tokenize(text, &mut collector);
        let dropped = collector.dropped_rows().len();
        let content = collector.finish()?;
        tracing::debug!(
            rows = content.row_count(),
            columns = content.column_count(),
            dropped,
            "parsed document"
        );

        let mut doc = Self::from_matrix(content);
        if let Some(sep) = config.primary_value_separator() {
            doc.value_separator = sep.to_string();
        }
        if let Some(sep) = config.primary_row_separator() {
            doc.row_separator = sep.to_string();
        }
        if let Some(quote) = config.primary_quote() {
            doc.quote = quote;
        }
        doc.reserved = config.reserved_characters();
        Ok(doc)
    }

    /// Use `separator` between cells on output.
    pub fn with_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.value_separator = separator.into();
        self
    }

    /// Use `separator` after every row on output.
    pub fn with_row_separator(mut self, separator: impl Into<String>) -> Self {
        self.row_separator = separator.into();
        self
    }

    /// Wrap quoted cells in `quote`.
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Choose which cells get quoted on output.
    pub fn with_quoting_rule(mut self, rule: QuotingRule) -> Self {
        self.quoting_rule = rule;
        self
    }

    pub fn value_separator(&self) -> &str {
        &self.value_separator
    }

    pub fn row_separator(&self) -> &str {
        &self.row_separator
    }

    pub fn quote(&self) -> char {
        self.quote
    }

    pub fn quoting_rule(&self) -> QuotingRule {
        self.quoting_rule
    }

    pub fn set_quoting_rule(&mut self, rule: QuotingRule) {
        self.quoting_rule = rule;
    }

    pub fn set_value_separator(&mut self, separator: impl Into<String>) {
        self.value_separator = separator.into();
    }

    pub fn set_row_separator(&mut self, separator: impl Into<String>) {
        self.row_separator = separator.into();
    }

    /// The underlying cell table.
    pub fn matrix(&self) -> &Matrix<Cell> {
        &self.content
    }

    pub fn into_matrix(self) -> Matrix<Cell> {
        self.content
    }

    pub fn row_count(&self) -> usize {
        self.content.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.content.column_count()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.content.rows()
    }

    // ── Cells ───────────────────────────────────────────────────────────────

    /// The cell at `(row, column)`, or `None` when either index is out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.content.get(row, column)
    }

    /// Replace one cell. Fails with `IndexOutOfBounds` for a bad row or column.
    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) -> Result<()> {
        self.content.set(row, column, cell)
    }

    // ── Rows ────────────────────────────────────────────────────────────────

    /// Row `index` as a slice, or `None` when out of range.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.content.row(index)
    }

    /// Replace row `index`. Fails with `IndexOutOfBounds` for a bad index and
    /// `Shape` when `row` is not `column_count()` cells wide.
    pub fn set_row(&mut self, index: usize, row: Vec<Cell>) -> Result<()> {
        self.content.set_row(index, row)
    }

    /// Insert before `index` (`index == row_count()` appends). Fails with
    /// `IndexOutOfBounds` past the end and `Shape` for the wrong width.
    pub fn insert_row(&mut self, index: usize, row: Vec<Cell>) -> Result<()> {
        self.content.insert_row(index, row)
    }

    /// Add a row at the bottom. Fails with `Shape` for the wrong width.
    pub fn append_row(&mut self, row: Vec<Cell>) -> Result<()> {
        self.content.append_row(row)
    }

    /// Remove and return row `index`. Fails with `WouldBeEmpty` on the last row.
    pub fn remove_row(&mut self, index: usize) -> Result<Vec<Cell>> {
        self.content.remove_row(index)
    }

    /// Exchange two rows. Fails with `IndexOutOfBounds`, leaving the table
    /// untouched, if either index is out of range.
    pub fn swap_rows(&mut self, first: usize, second: usize) -> Result<()> {
        self.content.swap_rows(first, second)
    }

    // ── Columns ─────────────────────────────────────────────────────────────

    /// A copy of column `index`, or `None` when out of range.
    pub fn column(&self, index: usize) -> Option<Vec<Cell>> {
        self.content.column(index).ok()
    }

    /// Replace column `index`. Fails with `IndexOutOfBounds` for a bad index and
    /// `Shape` when `column` is not `row_count()` cells tall.
    pub fn set_column(&mut self, index: usize, column: Vec<Cell>) -> Result<()> {
        self.content.set_column(index, column)
    }

    /// Insert before `index` (`index == column_count()` appends). Fails with
    /// `IndexOutOfBounds` past the end and `Shape` for the wrong height.
    pub fn insert_column(&mut self, index: usize, column: Vec<Cell>) -> Result<()> {
        self.content.insert_column(index, column)
    }

    /// Add a column on the right. Fails with `Shape` for the wrong height.
    pub fn append_column(&mut self, column: Vec<Cell>) -> Result<()> {
        self.content.append_column(column)
    }

    /// Remove and return column `index`. Fails with `WouldBeEmpty` on the last column.
    pub fn remove_column(&mut self, index: usize) -> Result<Vec<Cell>> {
        self.content.remove_column(index)
    }

    /// Exchange two columns. Fails with `IndexOutOfBounds`, leaving the table
    /// untouched, if either index is out of range.
    pub fn swap_columns(&mut self, first: usize, second: usize) -> Result<()> {
        self.content.swap_columns(first, second)
    }

    // ── Output ──────────────────────────────────────────────────────────────

    /// Serialize the table using the document's separators and quoting rule.
    pub fn to_delimited_string(&self) -> String {
        let mut out = String::new();
        for row in self.content.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push_str(&self.value_separator);
                }
                self.encode_cell(cell, &mut out);
            }
            out.push_str(&self.row_separator);
        }
        out
    }

    /// The serialized table as UTF-8 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_delimited_string().into_bytes()
    }

    /// The serialized table as UTF-16 little-endian bytes with a byte-order mark.
    pub fn to_utf16_bytes(&self) -> Vec<u8> {
        let text = self.to_delimited_string();
        let mut out = Vec::with_capacity(2 + text.len() * 2);
        out.extend_from_slice(&[0xFF, 0xFE]);
        for unit in text.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    fn encode_cell(&self, cell: &Cell, out: &mut String) {
        let text = cell.to_string();
        if self.needs_quoting(cell, &text) {
            out.push(self.quote);
            for ch in text.chars() {
                if ch == self.quote {
                    out.push(ch);
                }
                out.push(ch);
            }
            out.push(self.quote);
        } else {
            out.push_str(&text);
        }
    }

    fn needs_quoting(&self, cell: &Cell, text: &str) -> bool {
        match self.quoting_rule {
            QuotingRule::AllFields => true,
            QuotingRule::AllTextFields => cell.is_text(),
            QuotingRule::NecessaryTextFields => {
                cell.is_text()
                    && (text.contains(self.row_separator.as_str())
                        || text.contains(self.value_separator.as_str())
                        || text.contains(self.quote)
                        || text.contains(['\n', '\r'])
                        || text.contains(self.reserved.as_slice()))
            }
            QuotingRule::None => false,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(1, 1, Cell::Empty)
    }
}

impl FromStr for Document {
    type Err = DelimitedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Matrix<Cell>> for Document {
    fn from(content: Matrix<Cell>) -> Self {
        Self::from_matrix(content)
    }
}

impl Index<(usize, usize)> for Document {
    type Output = Cell;

    fn index(&self, index: (usize, usize)) -> &Cell {
        &self.content[index]
    }
}

impl IndexMut<(usize, usize)> for Document {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Cell {
        &mut self.content[index]
    }
}

/// The table's cell descriptions, row by row: `[[a, b], [1, 2]]`.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.content, f)
    }
}
