use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell positions for one source layout. `outflow` is the withdrawal/debit
/// cell, `inflow` the deposit/credit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub outflow: usize,
    pub inflow: usize,
    pub description: usize,
}

impl ColumnMap {
    /// Minimum number of cells a row must carry for this mapping.
    pub fn width(&self) -> usize {
        self.date
            .max(self.outflow)
            .max(self.inflow)
            .max(self.description)
            + 1
    }
}

/// The two supported account views.
///
/// `Deposit` rows are `[date, withdrawal, deposit, description]` where the
/// description cell may carry a second line. `CreditCard` rows are
/// `[date, posted, debit, credit, description]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountLayout {
    #[serde(rename = "deposit", alias = "chequing", alias = "checking")]
    Deposit,
    #[serde(rename = "credit-card", alias = "visa", alias = "credit")]
    CreditCard,
}

impl AccountLayout {
    pub fn columns(self) -> ColumnMap {
        match self {
            AccountLayout::Deposit => ColumnMap {
                date: 0,
                outflow: 1,
                inflow: 2,
                description: 3,
            },
            AccountLayout::CreditCard => ColumnMap {
                date: 0,
                outflow: 2,
                inflow: 3,
                description: 4,
            },
        }
    }

    /// Whether the description cell splits into description + secondary.
    pub fn has_secondary(self) -> bool {
        matches!(self, AccountLayout::Deposit)
    }
}

impl fmt::Display for AccountLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountLayout::Deposit => write!(f, "deposit"),
            AccountLayout::CreditCard => write!(f, "credit-card"),
        }
    }
}

impl std::str::FromStr for AccountLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" | "chequing" | "checking" => Ok(AccountLayout::Deposit),
            "credit-card" | "creditcard" | "credit" | "visa" => Ok(AccountLayout::CreditCard),
            other => Err(format!("Unknown account layout: '{other}' (expected chequing or visa)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_columns() {
        let cols = AccountLayout::Deposit.columns();
        assert_eq!((cols.date, cols.outflow, cols.inflow, cols.description), (0, 1, 2, 3));
        assert_eq!(cols.width(), 4);
    }

    #[test]
    fn credit_card_columns() {
        let cols = AccountLayout::CreditCard.columns();
        assert_eq!((cols.date, cols.outflow, cols.inflow, cols.description), (0, 2, 3, 4));
        assert_eq!(cols.width(), 5);
    }

    #[test]
    fn parse_account_type_names() {
        assert_eq!("chequing".parse::<AccountLayout>().unwrap(), AccountLayout::Deposit);
        assert_eq!("Deposit".parse::<AccountLayout>().unwrap(), AccountLayout::Deposit);
        assert_eq!("visa".parse::<AccountLayout>().unwrap(), AccountLayout::CreditCard);
        assert_eq!("credit-card".parse::<AccountLayout>().unwrap(), AccountLayout::CreditCard);
        assert!("savings".parse::<AccountLayout>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for layout in [AccountLayout::Deposit, AccountLayout::CreditCard] {
            assert_eq!(layout.to_string().parse::<AccountLayout>().unwrap(), layout);
        }
    }

    #[test]
    fn serde_accepts_legacy_names() {
        let layout: AccountLayout = serde_json::from_str("\"visa\"").unwrap();
        assert_eq!(layout, AccountLayout::CreditCard);
        let layout: AccountLayout = serde_json::from_str("\"chequing\"").unwrap();
        assert_eq!(layout, AccountLayout::Deposit);
        assert_eq!(serde_json::to_string(&AccountLayout::CreditCard).unwrap(), "\"credit-card\"");
    }

    #[test]
    fn only_deposit_has_secondary() {
        assert!(AccountLayout::Deposit.has_secondary());
        assert!(!AccountLayout::CreditCard.has_secondary());
    }
}
