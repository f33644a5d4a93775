use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::layout::AccountLayout;

/// How the bank prints dates in both views, e.g. `Jan. 5, 2019`.
pub const DEFAULT_SOURCE_DATE_FORMAT: &str = "%b. %d, %Y";
/// Date format of the ledger CSV.
pub const LEDGER_DATE_FORMAT: &str = "%Y/%m/%d";

/// A normalized transaction. `amount` is negative for money leaving the
/// account and never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub date: String,
    pub amount: Decimal,
    pub account: String,
    pub description: String,
    pub secondary: Option<String>,
}

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub layout: AccountLayout,
    pub account_name: String,
    /// Applied by the scraper on the bank side; extraction never re-filters.
    pub start_date: Option<NaiveDate>,
    pub source_date_format: String,
    pub output_date_format: String,
}

impl ExtractionConfig {
    pub fn new(layout: AccountLayout, account_name: &str) -> Self {
        ExtractionConfig {
            layout,
            account_name: account_name.to_string(),
            start_date: None,
            source_date_format: DEFAULT_SOURCE_DATE_FORMAT.to_string(),
            output_date_format: LEDGER_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_start_date(mut self, start: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self
    }

    pub fn with_source_date_format(mut self, format: &str) -> Self {
        self.source_date_format = format.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ExtractionConfig::new(AccountLayout::Deposit, "assets:chequing");
        assert_eq!(config.account_name, "assets:chequing");
        assert_eq!(config.start_date, None);
        assert_eq!(config.source_date_format, "%b. %d, %Y");
        assert_eq!(config.output_date_format, "%Y/%m/%d");
    }

    #[test]
    fn config_builders() {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let config = ExtractionConfig::new(AccountLayout::CreditCard, "liabilities:visa")
            .with_start_date(Some(start))
            .with_source_date_format("%m/%d/%Y");
        assert_eq!(config.start_date, Some(start));
        assert_eq!(config.source_date_format, "%m/%d/%Y");
    }
}
