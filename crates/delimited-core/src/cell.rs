//! Typed cell values and best-effort type sniffing.
//!
//! A raw field is trimmed and then classified in a fixed priority order:
//!
//! 1. empty → [`Cell::Empty`]
//! 2. date (configured formats, then the rendered forms, then RFC 3339) → [`Cell::Date`]
//! 3. `i64` → [`Cell::Integer`]
//! 4. finite `f64` → [`Cell::Decimal`]
//! 5. anything else → [`Cell::Text`]
//!
//! Dates are tried before integers, so a compact format such as `%Y%m%d`
//! claims `20240115` before the integer classifier sees it.
//!
//! The `Display` form of every cell re-classifies to an equal cell, which is
//! what makes `parse(serialize(table)) == table` hold.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DATE_FORMATS;

/// One classified value at a row/column position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Cell {
    Header(String),
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDateTime),
    #[default]
    Empty,
}

impl Cell {
    /// Classify a raw field using the default date formats.
    pub fn parse(raw: &str) -> Cell {
        Cell::parse_with(raw, DEFAULT_DATE_FORMATS)
    }

    /// Classify a raw field, trying `date_formats` for the date step.
    ///
    /// Never fails: every input maps to exactly one variant.
    pub fn parse_with<S: AsRef<str>>(raw: &str, date_formats: &[S]) -> Cell {
        let clean = raw.trim();
        if clean.is_empty() {
            return Cell::Empty;
        }
        if let Some(date) = parse_date(clean, date_formats) {
            return Cell::Date(date);
        }
        if let Ok(integer) = clean.parse::<i64>() {
            return Cell::Integer(integer);
        }
        if let Ok(decimal) = clean.parse::<f64>() {
            // "inf" and "NaN" parse as f64 but are words, not measurements.
            if decimal.is_finite() {
                return Cell::Decimal(decimal);
            }
        }
        Cell::Text(clean.to_string())
    }

    /// A `Header` carrying this cell's description.
    pub fn header(&self) -> Cell {
        match self {
            Cell::Header(_) => self.clone(),
            other => Cell::Header(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Header(_) => "Header",
            Cell::Text(_) => "Text",
            Cell::Integer(_) => "Integer",
            Cell::Decimal(_) => "Decimal",
            Cell::Date(_) => "Date",
            Cell::Empty => "Empty",
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Cell::Header(_))
    }

    /// Text-bearing cells (`Text` or `Header`) are the ones quoting rules consider.
    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Header(_) | Cell::Text(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// The forms `Display` writes dates in. Always accepted, whatever the
/// configured formats, so a rendered date reads back as a date.
const RENDERED_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S%.f"];

/// Try each configured format, then the rendered forms, then RFC 3339.
///
/// Formats without time fields yield midnight of the parsed day.
fn parse_date<S: AsRef<str>>(s: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let configured = formats.iter().map(|format| format.as_ref());
    for format in configured.chain(RENDERED_DATE_FORMATS) {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

fn format_date(dt: &NaiveDateTime, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if dt.time() == NaiveTime::MIN {
        write!(f, "{}", dt.format("%Y-%m-%d"))
    } else if dt.nanosecond() == 0 {
        write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
    } else {
        write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f"))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Header(s) | Cell::Text(s) => f.write_str(s),
            Cell::Integer(n) => write!(f, "{}", n),
            // Debug keeps a fractional part (`3.0`), so the rendering never
            // re-classifies as an integer.
            Cell::Decimal(x) => write!(f, "{:?}", x),
            Cell::Date(dt) => format_date(dt, f),
            Cell::Empty => Ok(()),
        }
    }
}

impl FromStr for Cell {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Cell::parse(s))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Decimal(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Date(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}
