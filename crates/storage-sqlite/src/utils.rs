//! Shared row-conversion helpers.

use rust_decimal::Decimal;
use std::str::FromStr;

use wayfare_core::errors::{DatabaseError, Error, Result};

/// Parses a money column stored as a decimal string.
pub(crate) fn parse_money(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Corrupt decimal in {column}: {e}"
        )))
    })
}

/// Parses an optional money column.
pub(crate) fn parse_money_opt(value: Option<&str>, column: &str) -> Result<Option<Decimal>> {
    value.map(|v| parse_money(v, column)).transpose()
}
