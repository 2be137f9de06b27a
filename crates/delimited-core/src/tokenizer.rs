//! Streaming tokenizer: turns delimited text into cell and row events.
//!
//! The tokenizer makes a single left-to-right pass over the input, dispatching
//! on character class (value separator, quote, row separator, anything else)
//! and reporting what it finds to a [`TokenizerDelegate`]. It never validates:
//! ragged rows, unterminated quotes and empty input are all accepted.
//!
//! # Event order
//!
//! ```text
//! document_start
//!   row_start(0)  cell_found(.., 0, 0) .. cell_found(.., 0, n)  row_end(0, n + 1)
//!   row_start(1)  ..                                              row_end(1, ..)
//!   ..
//! document_end
//! ```
//!
//! The final cell is always flushed, even without a trailing row separator, so
//! the last `row_start` is always matched by a `row_end`. A trailing row
//! separator therefore produces a final row holding one empty cell.
//!
//! # Quoted spans
//!
//! With `ignore_quoted_separators` set, a quote character opens a span that
//! runs to the next occurrence of the *same* quote character. Everything inside
//! is taken verbatim, separators included; the quotes themselves are dropped.
//! A doubled quote (`""`) inside a span is a literal quote. An unterminated
//! span runs to end of input.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

use crate::config::ParserConfig;

/// Receives tokenizer events. Only the cell and row-end callbacks are required.
pub trait TokenizerDelegate {
    fn document_start(&mut self) {}

    fn row_start(&mut self, _row: usize) {}

    /// `text` is the raw field with quotes removed; no trimming has been applied.
    fn cell_found(&mut self, text: &str, row: usize, column: usize);

    /// `column_count` is the number of cells delivered for `row`.
    fn row_end(&mut self, row: usize, column_count: usize);

    fn document_end(&mut self) {}

    /// Polled after every character. Returning `true` halts the scan: no further
    /// cell or row events are delivered, and `document_end` is called once.
    fn should_abort(&self) -> bool {
        false
    }
}

/// How a scan finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The whole input was consumed; `rows` rows were reported.
    Completed { rows: usize },
    /// The delegate asked to stop.
    Aborted,
}

/// An owned tokenizer event, for delegates that just record what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DocumentStart,
    RowStart(usize),
    Cell {
        text: String,
        row: usize,
        column: usize,
    },
    RowEnd {
        row: usize,
        column_count: usize,
    },
    DocumentEnd,
}

impl TokenizerDelegate for Vec<Event> {
    fn document_start(&mut self) {
        self.push(Event::DocumentStart);
    }

    fn row_start(&mut self, row: usize) {
        self.push(Event::RowStart(row));
    }

    fn cell_found(&mut self, text: &str, row: usize, column: usize) {
        self.push(Event::Cell {
            text: text.to_string(),
            row,
            column,
        });
    }

    fn row_end(&mut self, row: usize, column_count: usize) {
        self.push(Event::RowEnd { row, column_count });
    }

    fn document_end(&mut self) {
        self.push(Event::DocumentEnd);
    }
}

/// Character-class scanner over a borrowed configuration.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'c> {
    config: &'c ParserConfig,
}

/// Mutable scan position: the pending field plus the current row and column.
struct Cursor {
    cell: String,
    row: usize,
    column: usize,
}

impl<'c> Tokenizer<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        self.config
    }

    /// Scan `text`, reporting every event to `delegate`.
    pub fn tokenize<D: TokenizerDelegate + ?Sized>(&self, text: &str, delegate: &mut D) -> ScanOutcome {
        let text = self.normalize(text);
        let mut chars = text.chars().peekable();
        let mut cursor = Cursor {
            cell: String::new(),
            row: 0,
            column: 0,
        };

        delegate.document_start();
        delegate.row_start(0);

        while let Some(c) = chars.next() {
            if self.config.value_separators.contains(&c) {
                end_cell(&mut cursor, delegate);
            } else if self.config.ignore_quoted_separators && self.config.quote_characters.contains(&c) {
                read_quoted(c, &mut chars, &mut cursor.cell);
            } else if self.config.row_separators.contains(&c) {
                end_cell(&mut cursor, delegate);
                delegate.row_end(cursor.row, cursor.column);
                cursor.row += 1;
                cursor.column = 0;
                delegate.row_start(cursor.row);
            } else {
                cursor.cell.push(c);
            }

            if delegate.should_abort() {
                tracing::debug!(row = cursor.row, column = cursor.column, "scan aborted by delegate");
                delegate.document_end();
                return ScanOutcome::Aborted;
            }
        }

        delegate.cell_found(&cursor.cell, cursor.row, cursor.column);
        delegate.row_end(cursor.row, cursor.column + 1);
        delegate.document_end();

        let rows = cursor.row + 1;
        tracing::debug!(rows, "scan completed");
        ScanOutcome::Completed { rows }
    }

    /// Scan `text` and return the events as a list.
    pub fn events(&self, text: &str) -> Vec<Event> {
        let mut events = Vec::new();
        self.tokenize(text, &mut events);
        events
    }

    fn normalize<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.config.primary_row_separator() {
            Some(row_sep) if self.config.normalize_crlf && text.contains("\r\n") => {
                Cow::Owned(text.replace("\r\n", row_sep.encode_utf8(&mut [0; 4])))
            }
            _ => Cow::Borrowed(text),
        }
    }
}

/// The value-separator action: report the pending field and move one column right.
fn end_cell<D: TokenizerDelegate + ?Sized>(cursor: &mut Cursor, delegate: &mut D) {
    delegate.cell_found(&cursor.cell, cursor.row, cursor.column);
    cursor.column += 1;
    cursor.cell.clear();
}

/// Consume a quoted span opened by `quote`, leaving the iterator after the
/// closing quote (or exhausted).
fn read_quoted(quote: char, chars: &mut Peekable<Chars<'_>>, cell: &mut String) {
    while let Some(c) = chars.next() {
        if c == quote {
            if chars.peek() == Some(&quote) {
                chars.next();
                cell.push(quote);
                continue;
            }
            return;
        }
        cell.push(c);
    }
}
