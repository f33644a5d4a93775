use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a currency-formatted cell such as `"1,234.56"` or `"$50.00"`.
///
/// Grouping commas, the dollar sign and any whitespace are stripped first.
/// Returns `None` for empty or non-numeric text.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim().replace([',', '$', ' ', '\u{a0}'], "");
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(&s).ok()
}

/// Renders an amount the way the ledger import expects: plain decimal,
/// leading `-` for negatives, no grouping, no trailing zeros (`-100`, `12.5`).
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_amount_plain() {
        assert_eq!(parse_amount("123.45"), Some(dec!(123.45)));
    }

    #[test]
    fn parse_amount_strips_grouping() {
        assert_eq!(parse_amount("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_amount("12,345,678.90"), Some(dec!(12345678.90)));
    }

    #[test]
    fn parse_amount_with_dollar_sign_and_padding() {
        assert_eq!(parse_amount("  $99.99 "), Some(dec!(99.99)));
        assert_eq!(parse_amount("\u{a0}5.00"), Some(dec!(5.00)));
    }

    #[test]
    fn parse_amount_empty_or_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("PENDING"), None);
        assert_eq!(parse_amount("-"), None);
    }

    #[test]
    fn format_amount_drops_trailing_zeros() {
        assert_eq!(format_amount(dec!(-100.00)), "-100");
        assert_eq!(format_amount(dec!(50.00)), "50");
        assert_eq!(format_amount(dec!(12.50)), "12.5");
        assert_eq!(format_amount(dec!(-0.01)), "-0.01");
    }

    #[test]
    fn format_amount_has_no_grouping() {
        assert_eq!(format_amount(dec!(1234567.89)), "1234567.89");
    }
}
