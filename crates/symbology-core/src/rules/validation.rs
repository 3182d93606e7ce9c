//! Boundary input validation
//!
//! Shape checks applied to raw transport input before it reaches the
//! mapping operations. The core itself trusts its arguments.

use chrono::NaiveDate;

use crate::errors::{Result, SymbologyError};

/// Longest accepted symbol
pub const MAX_SYMBOL_LEN: usize = 12;

/// Calendar-date wire format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a symbol: 1..=MAX_SYMBOL_LEN ASCII letters
///
/// # Errors
/// * `InvalidSymbol` - empty, too long, or containing a non-letter
pub fn validate_symbol(symbol: &str) -> Result<()> {
    let invalid = |reason: String| SymbologyError::InvalidSymbol {
        symbol: symbol.to_string(),
        reason,
    };

    if symbol.is_empty() {
        return Err(invalid("symbol cannot be empty".to_string()));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(invalid(format!(
            "symbol is longer than {} characters",
            MAX_SYMBOL_LEN
        )));
    }
    if let Some(bad) = symbol.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(invalid(format!("'{}' is not a letter", bad)));
    }
    Ok(())
}

/// Validate a raw identifier and narrow it to the core's type
///
/// # Errors
/// * `InvalidIdentifier` - zero or negative
pub fn validate_identifier(identifier: i64) -> Result<u64> {
    if identifier <= 0 {
        return Err(SymbologyError::InvalidIdentifier { identifier });
    }
    Ok(identifier as u64)
}

/// Parse an ISO `YYYY-MM-DD` calendar date
///
/// The input must be exactly ten characters: no surrounding whitespace,
/// no single-digit month or day.
///
/// # Errors
/// * `InvalidDate` - anything else
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let invalid = || SymbologyError::InvalidDate {
        value: value.to_string(),
    };
    if !has_iso_date_shape(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
