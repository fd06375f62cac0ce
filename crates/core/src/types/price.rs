//! Price values as the catalog stores them.
//!
//! Admins type prices into a free-text field, so a catalog record may hold
//! `60`, `"60"`, `"₹60 / liter"` or anything else. [`Price`] keeps whatever
//! was stored and [`Price::amount`] normalizes it to a number.
//!
//! The text rule is deliberately literal: every character that is not an
//! ASCII digit or `.` is discarded, then the leading float of what remains is
//! parsed. Commas are discarded too, so `"₹1,234.50"` reads as `1234.50`
//! only by accident of the digits lining up; `"1.234,50"` reads as `1.2345`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol used when rendering amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// A price as stored on a product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// Already numeric.
    Amount(f64),
    /// Free text, possibly with currency symbols and units.
    Text(String),
    /// Anything else the catalog happened to hold (null, bool, object...).
    Other(serde_json::Value),
}

impl Default for Price {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

impl Price {
    /// Numeric amount of this price.
    ///
    /// Numbers are returned unchanged, text goes through
    /// [`parse_price_text`], and any other value is `0.0`.
    ///
    /// ```
    /// use mrseafarm_core::Price;
    ///
    /// assert_eq!(Price::Amount(120.0).amount(), 120.0);
    /// assert_eq!(Price::from("₹60 / liter").amount(), 60.0);
    /// assert_eq!(Price::default().amount(), 0.0);
    /// ```
    #[must_use]
    pub fn amount(&self) -> f64 {
        match self {
            Self::Amount(amount) => *amount,
            Self::Text(text) => parse_price_text(text),
            Self::Other(_) => 0.0,
        }
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self::Amount(amount)
    }
}

impl From<&str> for Price {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Price {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{CURRENCY_SYMBOL}{amount}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::Other(_) => write!(f, "{CURRENCY_SYMBOL}0"),
        }
    }
}

/// Parse a free-text price into a non-negative amount.
///
/// Strips every character except ASCII digits and `.`, then parses the
/// longest leading float of the remainder. Returns `0.0` when nothing
/// parseable is left.
#[must_use]
pub fn parse_price_text(text: &str) -> f64 {
    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    leading_float(&filtered).unwrap_or(0.0)
}

/// Render an amount with exactly two decimals.
///
/// Halves round away from zero on the exact binary value, so `10.125` shows
/// as `10.13` while `1.005` (stored just below the half) shows as `1.00`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    Decimal::from_f64_retain(amount).map_or_else(
        || format!("{amount:.2}"),
        |exact| {
            let mut rounded =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        },
    )
}

/// Longest prefix of `s` matching `digits* ['.' digits*]` with at least one digit.
fn leading_float(s: &str) -> Option<f64> {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut end = int_len;

    if s.as_bytes().get(int_len) == Some(&b'.') {
        let frac_len = s
            .bytes()
            .skip(int_len + 1)
            .take_while(u8::is_ascii_digit)
            .count();
        if int_len > 0 || frac_len > 0 {
            end = int_len + 1 + frac_len;
        }
    }

    if end == 0 {
        return None;
    }
    s.get(..end)?.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_number_is_unchanged() {
        assert_eq!(Price::Amount(120.0).amount(), 120.0);
        assert_eq!(Price::Amount(0.5).amount(), 0.5);
    }

    #[test]
    fn test_text_with_symbol_and_unit() {
        assert_eq!(parse_price_text("₹60 / liter"), 60.0);
        assert_eq!(parse_price_text("₹80/liter"), 80.0);
        assert_eq!(parse_price_text("45.50 per kg"), 45.5);
    }

    #[test]
    fn test_text_plain_number() {
        assert_eq!(parse_price_text("250"), 250.0);
        assert_eq!(parse_price_text("12."), 12.0);
        assert_eq!(parse_price_text(".75"), 0.75);
    }

    #[test]
    fn test_text_without_digits_is_zero() {
        assert_eq!(parse_price_text(""), 0.0);
        assert_eq!(parse_price_text("free"), 0.0);
        assert_eq!(parse_price_text("."), 0.0);
        assert_eq!(parse_price_text("Rs."), 0.0);
    }

    #[test]
    fn test_multiple_decimal_points_take_leading_float() {
        assert_eq!(parse_price_text("1.2.3"), 1.2);
        assert_eq!(parse_price_text("..5"), 0.0);
        // the abbreviation's dot survives filtering
        assert_eq!(parse_price_text("Rs. 45.50 per kg"), 0.45);
    }

    #[test]
    fn test_commas_are_stripped_not_interpreted() {
        assert_eq!(parse_price_text("₹1,234.50"), 1234.5);
        assert_eq!(parse_price_text("1.234,50"), 1.23450);
    }

    #[test]
    fn test_format_amount_rounds_halves_up() {
        assert_eq!(format_amount(10.125), "10.13");
        assert_eq!(format_amount(0.625), "0.63");
        assert_eq!(format_amount(1.005), "1.00");
        assert_eq!(format_amount(280.0), "280.00");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn test_other_values_are_zero() {
        assert_eq!(Price::Other(serde_json::Value::Bool(true)).amount(), 0.0);
        assert_eq!(Price::default().amount(), 0.0);
    }

    #[test]
    fn test_deserialize_untagged() {
        let number: Price = serde_json::from_str("120").unwrap();
        assert_eq!(number, Price::Amount(120.0));

        let text: Price = serde_json::from_str("\"₹60 / liter\"").unwrap();
        assert_eq!(text, Price::Text("₹60 / liter".to_string()));

        let null: Price = serde_json::from_str("null").unwrap();
        assert_eq!(null.amount(), 0.0);
    }
}
