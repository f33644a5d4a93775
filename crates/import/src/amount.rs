use ledgerpull_core::parse_amount;
use rust_decimal::Decimal;
use thiserror::Error;

/// Neither amount cell holds a number. The bank emits these for
/// non-monetary rows such as pending authorizations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Neither amount cell parses (outflow={outflow:?}, inflow={inflow:?})")]
pub struct AmbiguousAmount {
    pub outflow: String,
    pub inflow: String,
}

/// Resolves a withdrawal/deposit (or debit/credit) pair into one signed amount.
///
/// The outflow cell wins when both cells parse.
pub fn try_resolve_amount(outflow: &str, inflow: &str) -> Result<Decimal, AmbiguousAmount> {
    match (parse_amount(outflow), parse_amount(inflow)) {
        (Some(out), _) => Ok(-out),
        (None, Some(inc)) => Ok(inc),
        (None, None) => Err(AmbiguousAmount {
            outflow: outflow.to_string(),
            inflow: inflow.to_string(),
        }),
    }
}

/// Like [`try_resolve_amount`], but an unparseable pair resolves to zero so the
/// row falls out through the zero-amount rule.
pub fn resolve_amount(outflow: &str, inflow: &str) -> Decimal {
    try_resolve_amount(outflow, inflow).unwrap_or_else(|e| {
        tracing::debug!("{e}; treating as zero");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn withdrawal_is_negative() {
        assert_eq!(resolve_amount("100.00", ""), dec!(-100.00));
    }

    #[test]
    fn deposit_is_positive() {
        assert_eq!(resolve_amount("", "50.00"), dec!(50.00));
    }

    #[test]
    fn grouping_separators_are_stripped() {
        assert_eq!(resolve_amount("1,234.56", ""), dec!(-1234.56));
        assert_eq!(resolve_amount("", "2,000.00"), dec!(2000));
    }

    #[test]
    fn outflow_wins_when_both_parse() {
        assert_eq!(resolve_amount("10.00", "25.00"), dec!(-10));
    }

    #[test]
    fn both_empty_is_ambiguous() {
        let err = try_resolve_amount("", " ").unwrap_err();
        assert_eq!(err.outflow, "");
        assert_eq!(err.inflow, " ");
        assert!(resolve_amount("", " ").is_zero());
    }

    #[test]
    fn both_unparseable_resolves_to_zero() {
        assert!(resolve_amount("PENDING", "n/a").is_zero());
    }

    #[test]
    fn zero_withdrawal_is_zero() {
        assert!(resolve_amount("0.00", "").is_zero());
    }
}
