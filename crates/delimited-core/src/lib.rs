//! # delimited-core
//!
//! Parse delimited text (CSV, TSV, and friends) into an in-memory table of
//! typed cells, edit it, and write it back out under a configurable quoting
//! rule.
//!
//! ## Quick start
//!
//! ```rust
//! use delimited_core::{Cell, Document, QuotingRule};
//!
//! let mut doc = Document::parse("name,age\nAlice,30\nBob,41\n").unwrap();
//! assert_eq!(doc.row_count(), 3);
//! assert_eq!(doc[(1, 1)], Cell::Integer(30));
//!
//! doc.set_cell(2, 0, Cell::from("Bob, Jr.")).unwrap();
//! assert_eq!(
//!     doc.to_delimited_string(),
//!     "name,age\nAlice,30\n\"Bob, Jr.\",41\n"
//! );
//!
//! let doc = doc.with_quoting_rule(QuotingRule::AllFields);
//! assert!(doc.to_delimited_string().starts_with("\"name\",\"age\""));
//! ```
//!
//! ## Modules
//!
//! - [`tokenizer`]: single-pass character scanner emitting cell/row events
//! - [`collector`]: event consumer that builds a `Matrix<Cell>`
//! - [`cell`]: typed values and type sniffing
//! - [`document`]: table editing and serialization
//! - [`extract`]: find tables inside larger text; load from files
//! - [`matrix`]: row/column storage
//! - [`config`]: `ParserConfig`, `QuotingRule`, `RowPolicy`
//! - [`error`]: error type

pub mod cell;
pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod matrix;
pub mod tokenizer;

pub use cell::Cell;
pub use collector::Collector;
pub use config::{ParserConfig, QuotingRule, RowPolicy, DEFAULT_DATE_FORMATS};
pub use document::{parse_document, Document};
pub use error::{DelimitedError, Result};
pub use extract::{extract_documents, load_documents, load_documents_or_empty};
pub use matrix::Matrix;
pub use tokenizer::{Event, ScanOutcome, Tokenizer, TokenizerDelegate};
