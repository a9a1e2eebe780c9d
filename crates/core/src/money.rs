use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot parse price from text: '{text}'")]
pub struct PriceParseError {
    /// The raw block text that failed numeral cleanup.
    pub text: String,
}

/// A monetary amount with exact decimal semantics (2 decimal places by
/// receipt convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).round().to_i64().unwrap_or(0)
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Parse a price from raw OCR block text: the decimal comma becomes a
    /// dot, every character that is neither a digit nor a dot is stripped,
    /// and the remainder must parse as a decimal fraction.
    ///
    /// Thousands-separated amounts like "1.234,56" clean up to "1.234.56"
    /// and fail — deliberately surfaced as an error rather than guessed at.
    pub fn from_receipt_text(text: &str) -> Result<Self, PriceParseError> {
        let cleaned: String = text
            .replace(',', ".")
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        Decimal::from_str(&cleaned)
            .map(Money)
            .map_err(|_| PriceParseError { text: text.to_string() })
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

// The summary contract wants `"total": 10.13`, a plain JSON number, so Money
// serializes through f64 rather than rust_decimal's string form.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
