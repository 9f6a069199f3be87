//! Field parsing utilities for Compass survey lines
//!
//! Helpers for pulling labelled values out of header lines and turning
//! numeric tokens into fixed-point decimals with proper error reporting.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{Error, Result};

/// Text following `label` up to the earliest of the `terminators`, trimmed
///
/// Returns `None` when the label does not occur in the line.
pub fn labeled_field<'a>(line: &'a str, label: &str, terminators: &[&str]) -> Option<&'a str> {
    let start = line.find(label)? + label.len();
    let rest = &line[start..];

    let end = terminators
        .iter()
        .filter_map(|terminator| rest.find(terminator))
        .min()
        .unwrap_or(rest.len());

    Some(rest[..end].trim())
}

/// Parse a decimal token exactly as written
///
/// Rounding happens once, after any unit conversion.
pub fn parse_decimal(token: &str, field: &'static str) -> Result<Decimal> {
    Decimal::from_str(token.trim()).map_err(|e| Error::invalid_number(token, field, e))
}

/// Parse an integer component of the survey date
pub fn parse_date_component(token: &str, raw: &str) -> Result<i64> {
    token
        .parse::<i64>()
        .map_err(|e| Error::invalid_date(raw, format!("'{}' is not a number ({})", token, e)))
}

/// Trim only the characters Compass pads marker lines with
///
/// `str::trim` would also strip the form feed and SUB markers themselves.
pub fn trim_padding(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Whether a line consists of nothing but the given marker character
pub fn is_marker(line: &str, marker: char) -> bool {
    let mut chars = trim_padding(line).chars();
    chars.next() == Some(marker) && chars.next().is_none()
}
