//! Field Parsers - normalise raw text cells into numbers
//!
//! Every parser is total: malformed or missing input yields `None` (or the
//! documented zero default), never a panic or an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Three-letter currency codes such as "USD " or "PKR".
    static ref CURRENCY_CODE: Regex = Regex::new(r"[A-Z]{3}\s*").expect("valid currency regex");
    /// Longest decimal prefix accepted as a float.
    static ref DECIMAL_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid decimal regex");
    static ref INTEGER_PREFIX: Regex = Regex::new(r"^[+-]?\d+").expect("valid integer regex");
    static ref FIRST_NUMBER: Regex = Regex::new(r"[\d.]+").expect("valid number regex");
}

/// Parse a launch price label like `"USD 1,299"` or `"PKR 299,999"`.
///
/// Currency codes and thousands separators are stripped; the remaining text
/// must start with a decimal number. Trailing text after the number is ignored.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let cleaned = CURRENCY_CODE.replace_all(raw, "").replace(',', "");
    parse_decimal_prefix(cleaned.trim())
}

/// Parse a battery capacity label like `"5000mAh"` or `"5,000 mAh"`.
pub fn parse_battery(raw: Option<&str>) -> Option<i64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let cleaned = raw.replace("mAh", "").replace(',', "");
    parse_integer_prefix(cleaned.trim())
}

/// Parse a launch year; anything unparseable becomes 0.
pub fn parse_year(raw: Option<&str>) -> i64 {
    raw.and_then(|s| parse_integer_prefix(s.trim())).unwrap_or(0)
}

/// First numeric token inside a label (`"8GB / 12GB"` -> 8.0), 0 when absent.
///
/// Only the decimal prefix of the token counts, so `"1.2.3GB"` gives 1.2.
pub fn leading_number(label: &str) -> f64 {
    FIRST_NUMBER
        .find(label)
        .and_then(|m| parse_decimal_prefix(m.as_str()))
        .unwrap_or(0.0)
}

fn parse_decimal_prefix(text: &str) -> Option<f64> {
    let m = DECIMAL_PREFIX.find(text)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_integer_prefix(text: &str) -> Option<i64> {
    let m = INTEGER_PREFIX.find(text)?;
    m.as_str().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_with_currency_codes() {
        assert_eq!(parse_price(Some("USD 1,299")), Some(1299.0));
        assert_eq!(parse_price(Some("PKR 299,999")), Some(299999.0));
        assert_eq!(parse_price(Some("AED 2,799.50")), Some(2799.5));
        assert_eq!(parse_price(Some("  799 ")), Some(799.0));
    }

    #[test]
    fn test_parse_price_malformed_is_none() {
        assert_eq!(parse_price(None), None);
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_price(Some("USD")), None);
        assert_eq!(parse_price(Some("Not available")), None);
        assert_eq!(parse_price(Some("n/a 100")), None);
        assert_eq!(parse_price(Some(",,,")), None);
    }

    #[test]
    fn test_parse_price_ignores_trailing_text() {
        assert_eq!(parse_price(Some("USD 999 (128GB)")), Some(999.0));
    }

    #[test]
    fn test_parse_battery() {
        assert_eq!(parse_battery(Some("5000mAh")), Some(5000));
        assert_eq!(parse_battery(Some("5,000 mAh")), Some(5000));
        assert_eq!(parse_battery(Some("")), None);
        assert_eq!(parse_battery(None), None);
        assert_eq!(parse_battery(Some("unknown")), None);
    }

    #[test]
    fn test_parse_year_defaults_to_zero() {
        assert_eq!(parse_year(Some("2023")), 2023);
        assert_eq!(parse_year(Some(" 2019 ")), 2019);
        assert_eq!(parse_year(Some("soon")), 0);
        assert_eq!(parse_year(None), 0);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("8GB / 12GB"), 8.0);
        assert_eq!(leading_number("1.5GB"), 1.5);
        assert_eq!(leading_number("Unknown"), 0.0);
    }

    #[test]
    fn test_leading_number_uses_decimal_prefix() {
        assert_eq!(leading_number("1.2.3GB"), 1.2);
        assert_eq!(leading_number("RAM .5GB"), 0.5);
        assert_eq!(leading_number("12.GB"), 12.0);
        assert_eq!(leading_number("v. GB"), 0.0);
    }
}
