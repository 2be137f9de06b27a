//! Collector: a [`TokenizerDelegate`] that builds a `Matrix<Cell>`.
//!
//! The first content row fixes the table width. Later rows are kept only when
//! their width matches; what happens to the others depends on the
//! [`RowPolicy`]. When the document ends, one trailing all-empty row and a
//! leading all-empty row are trimmed so blank edge lines don't leave phantom
//! rows behind.
//!
//! A *blank row* (a single empty cell, i.e. a blank line) never counts as
//! ragged. Before the width is fixed it is skipped, which is how leading blank
//! lines are absorbed.

use crate::cell::Cell;
use crate::config::{ParserConfig, RowPolicy};
use crate::error::{DelimitedError, Result};
use crate::matrix::Matrix;
use crate::tokenizer::TokenizerDelegate;

type Completion = Box<dyn FnOnce(&Collector)>;

pub struct Collector {
    table: Option<Matrix<Cell>>,
    current_row: Vec<Cell>,
    date_formats: Vec<String>,
    policy: RowPolicy,
    dropped: Vec<usize>,
    error: Option<DelimitedError>,
    completion: Option<Completion>,
}

impl Collector {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            table: None,
            current_row: Vec::new(),
            date_formats: config.date_formats.clone(),
            policy: config.row_policy,
            dropped: Vec::new(),
            error: None,
            completion: None,
        }
    }

    /// Register a callback run once, after end-of-document trimming.
    pub fn on_complete(mut self, callback: impl FnOnce(&Collector) + 'static) -> Self {
        self.completion = Some(Box::new(callback));
        self
    }

    /// The table collected so far, if any row has been accepted.
    pub fn table(&self) -> Option<&Matrix<Cell>> {
        self.table.as_ref()
    }

    /// Tokenizer row indices of rows dropped for having the wrong width.
    pub fn dropped_rows(&self) -> &[usize] {
        &self.dropped
    }

    /// Consume the collector and return the table.
    ///
    /// Yields a 1×1 `Empty` table when nothing was collected, and the ragged-row
    /// error when the strict policy stopped the scan.
    pub fn finish(self) -> Result<Matrix<Cell>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(self.table.unwrap_or_else(|| Matrix::new(1, 1, Cell::Empty)))
    }

    fn is_blank_row(&self) -> bool {
        self.current_row.len() == 1 && self.current_row[0].is_empty()
    }

    fn trim_edges(&mut self) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        // remove_row refuses to empty the table, so a lone blank row survives.
        if table.last_row().iter().all(Cell::is_empty) {
            let _ = table.remove_row(table.row_count() - 1);
        }
        if table.first_row().iter().all(Cell::is_empty) {
            let _ = table.remove_row(0);
        }
    }
}

impl TokenizerDelegate for Collector {
    fn document_start(&mut self) {
        self.current_row.clear();
    }

    fn cell_found(&mut self, text: &str, _row: usize, _column: usize) {
        self.current_row.push(Cell::parse_with(text, &self.date_formats));
    }

    fn row_end(&mut self, row: usize, _column_count: usize) {
        let blank = self.is_blank_row();
        let cells = std::mem::take(&mut self.current_row);
        let found = cells.len();

        let Some(expected) = self.table.as_ref().map(Matrix::column_count) else {
            if !blank {
                self.table = Matrix::from_rows(vec![cells]).ok();
            }
            return;
        };

        if found == expected {
            if let Some(table) = self.table.as_mut() {
                let _ = table.append_row(cells);
            }
            return;
        }
        if blank {
            return;
        }

        match self.policy {
            RowPolicy::Lenient => {
                tracing::debug!(row, expected, found, "dropping ragged row");
                self.dropped.push(row);
            }
            RowPolicy::Strict => {
                tracing::debug!(row, expected, found, "ragged row in strict mode");
                self.dropped.push(row);
                self.error = Some(DelimitedError::RaggedRow { row, expected, found });
            }
        }
    }

    fn document_end(&mut self) {
        if self.error.is_none() {
            self.trim_edges();
        }
        if let Some(callback) = self.completion.take() {
            callback(self);
        }
    }

    fn should_abort(&self) -> bool {
        self.error.is_some()
    }
}
