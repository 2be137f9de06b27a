//! `delim` CLI: reformat, inspect and extract delimited tables from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-serialize CSV with every text field quoted (stdin → stdout)
//! cat data.csv | delim format --quoting all-text-fields
//!
//! # Convert semicolon-separated input to a file
//! delim format -i data.csv -o clean.csv --delimiter ';'
//!
//! # Show the typed cells as JSON
//! delim inspect -i data.csv
//!
//! # Pull every table out of a text report
//! delim extract -i report.txt
//!
//! # Row/column counts and cell types
//! delim stats -i data.csv
//!
//! # Reject ragged rows instead of dropping them
//! delim format --strict -i data.csv
//! ```
//!
//! Logging goes to stderr. `-v` raises the level (info, debug, trace);
//! `RUST_LOG` takes precedence when set.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use delimited_core::{Cell, Document, ParserConfig, QuotingRule, RowPolicy};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "delim", version, about = "Delimited text (CSV/TSV) toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and re-serialize under a quoting rule
    Format {
        #[command(flatten)]
        parse: ParseArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Which cells to wrap in quotes
        #[arg(long, value_enum, default_value_t = QuotingArg::NecessaryTextFields)]
        quoting: QuotingArg,
    },
    /// Print the typed cells as JSON
    Inspect {
        #[command(flatten)]
        parse: ParseArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Find every table embedded in a larger text
    Extract {
        #[command(flatten)]
        parse: ParseArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Which cells to wrap in quotes
        #[arg(long, value_enum, default_value_t = QuotingArg::NecessaryTextFields)]
        quoting: QuotingArg,
    },
    /// Show table dimensions and cell-type counts
    Stats {
        #[command(flatten)]
        parse: ParseArgs,
    },
}

/// Input and parser options shared by every subcommand.
#[derive(Args)]
struct ParseArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// JSON file with parser settings; flags below override it
    #[arg(long)]
    config: Option<String>,
    /// Value separator (replaces the configured set)
    #[arg(short, long)]
    delimiter: Option<char>,
    /// Quote character (replaces the configured set)
    #[arg(long)]
    quote: Option<char>,
    /// Treat quote characters as ordinary text
    #[arg(long)]
    no_quotes: bool,
    /// Extra chrono date format to try when sniffing dates (repeatable)
    #[arg(long = "date-format")]
    date_formats: Vec<String>,
    /// Fail on rows whose width differs from the first row
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum QuotingArg {
    AllFields,
    AllTextFields,
    NecessaryTextFields,
    None,
}

impl From<QuotingArg> for QuotingRule {
    fn from(arg: QuotingArg) -> Self {
        match arg {
            QuotingArg::AllFields => QuotingRule::AllFields,
            QuotingArg::AllTextFields => QuotingRule::AllTextFields,
            QuotingArg::NecessaryTextFields => QuotingRule::NecessaryTextFields,
            QuotingArg::None => QuotingRule::None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Format {
            parse,
            output,
            quoting,
        } => {
            let config = build_config(&parse)?;
            let text = read_input(parse.input.as_deref())?;
            let doc = Document::parse_with(&text, &config)
                .context("Failed to parse input")?
                .with_quoting_rule(quoting.into());
            write_output(output.as_deref(), &doc.to_delimited_string())?;
        }
        Commands::Inspect { parse, output } => {
            let config = build_config(&parse)?;
            let text = read_input(parse.input.as_deref())?;
            let doc = Document::parse_with(&text, &config).context("Failed to parse input")?;
            let cells: Vec<&[Cell]> = doc.rows().collect();
            let value = serde_json::json!({
                "rows": doc.row_count(),
                "columns": doc.column_count(),
                "cells": cells,
            });
            let mut pretty = serde_json::to_string_pretty(&value)?;
            pretty.push('\n');
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Extract {
            parse,
            output,
            quoting,
        } => {
            let config = build_config(&parse)?;
            let text = read_input(parse.input.as_deref())?;
            let docs = delimited_core::extract_documents(&text, None, &config)
                .context("Failed to extract tables")?;
            tracing::info!(count = docs.len(), "tables found");
            let rendered: Vec<String> = docs
                .into_iter()
                .map(|doc| doc.with_quoting_rule(quoting.into()).to_delimited_string())
                .collect();
            write_output(output.as_deref(), &rendered.join("\n"))?;
        }
        Commands::Stats { parse } => {
            let config = build_config(&parse)?;
            let text = read_input(parse.input.as_deref())?;
            let doc = Document::parse_with(&text, &config).context("Failed to parse input")?;
            println!("Rows:     {}", doc.row_count());
            println!("Columns:  {}", doc.column_count());
            for (name, count) in type_counts(&doc) {
                println!("{:<9} {}", format!("{}:", name), count);
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Build the parser configuration from `--config` and the override flags.
///
/// - `--delimiter ';'` replaces the value-separator set with `[';']`
/// - `--date-format` appends to the configured formats
/// - `--strict` switches the row policy; it never switches back to lenient
fn build_config(args: &ParseArgs) -> Result<ParserConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid parser config in {}", path))?
        }
        None => ParserConfig::default(),
    };

    if let Some(delimiter) = args.delimiter {
        if config.row_separators.contains(&delimiter) {
            anyhow::bail!("Delimiter {:?} is also a row separator", delimiter);
        }
        config.value_separators = vec![delimiter];
    }
    if let Some(quote) = args.quote {
        config.quote_characters = vec![quote];
    }
    if args.no_quotes {
        config.ignore_quoted_separators = false;
    }
    config.date_formats.extend(args.date_formats.iter().cloned());
    if args.strict {
        config.row_policy = RowPolicy::Strict;
    }

    tracing::debug!(?config, "parser configuration");
    Ok(config)
}

/// Count cells per type, in a fixed order.
fn type_counts(doc: &Document) -> [(&'static str, usize); 6] {
    let mut counts = [
        ("Header", 0),
        ("Text", 0),
        ("Integer", 0),
        ("Decimal", 0),
        ("Date", 0),
        ("Empty", 0),
    ];
    for cell in doc.rows().flatten() {
        if let Some(entry) = counts.iter_mut().find(|(name, _)| *name == cell.type_name()) {
            entry.1 += 1;
        }
    }
    counts
}

/// Delimited text from `-i` or stdin. Input must be UTF-8.
fn read_input(path: Option<&str>) -> Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read delimited input from {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read delimited input from stdin")?;
            buf
        }
    };
    tracing::debug!(bytes = text.len(), source = path.unwrap_or("stdin"), "input read");
    Ok(text)
}

/// Rendered tables to `-o` or stdout.
fn write_output(path: Option<&str>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write rendered output to {}", path)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write rendered output to stdout")
        }
    }
}
