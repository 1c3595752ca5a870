//! Display-price parsing.
//!
//! Catalog prices are stored and persisted verbatim as display strings in
//! the convention the catalog data ships with: a leading `$`, `.` as the
//! thousands separator, and `,` as the decimal separator.
//!
//! - `"$1.599,99"` is 1599.99
//! - `"$699.990"` is 699990.0 (no decimal part)
//!
//! # Lenient fallback policy
//!
//! Parsing an empty or malformed string yields `0.0` and never fails. This
//! mirrors the behavior the catalog data has always been consumed with:
//! a bad price renders (and totals) as zero rather than blocking the cart.
//! Callers that need to detect bad data should check the string themselves;
//! the cart and checkout paths intentionally do not.

/// Parse a display-price string into a numeric amount.
///
/// Parsing steps, in order: strip the leading `$`, delete every `.`
/// (thousands separators), swap the `,` for a decimal point, then parse as
/// `f64`. A string with no `,` has no fractional part.
///
/// Returns `0.0` for empty or malformed input (see the module docs for why
/// this is lenient rather than an error).
///
/// # Examples
///
/// ```
/// use arcadia_core::price::parse_amount;
///
/// assert_eq!(parse_amount("$1.599,99"), 1599.99);
/// assert_eq!(parse_amount("$699.990"), 699_990.0);
/// assert_eq!(parse_amount(""), 0.0);
/// ```
#[must_use]
pub fn parse_amount(price: &str) -> f64 {
    let stripped = price.strip_prefix('$').unwrap_or(price);
    let normalized = stripped.replace('.', "").replace(',', ".");
    normalized.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_and_decimals() {
        assert_eq!(parse_amount("$1.599,99"), 1599.99);
        assert_eq!(parse_amount("$12.345.678,90"), 12_345_678.90);
    }

    #[test]
    fn test_no_decimal_part() {
        assert_eq!(parse_amount("$699.990"), 699_990.0);
        assert_eq!(parse_amount("$5"), 5.0);
    }

    #[test]
    fn test_decimals_only() {
        assert_eq!(parse_amount("$10,00"), 10.0);
        assert_eq!(parse_amount("$5,50"), 5.5);
    }

    #[test]
    fn test_missing_dollar_sign() {
        // The prefix is optional on input even though the data always has it
        assert_eq!(parse_amount("1.599,99"), 1599.99);
    }

    // The zero fallback is deliberate: bad catalog data must total as zero,
    // not crash the cart. Do not "fix" these to return errors.
    #[test]
    fn test_empty_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("$"), 0.0);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(parse_amount("free"), 0.0);
        assert_eq!(parse_amount("$1,2,3"), 0.0);
        assert_eq!(parse_amount("$12x99"), 0.0);
    }
}
