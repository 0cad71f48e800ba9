//! Ledger domain types for journal entry creation and validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// The five account types of the chart of accounts.
///
/// The account code conventionally encodes the type as well:
/// 1000s = Asset, 2000s = Liability, 3000s = Equity, 4000s = Income,
/// 5000 and above = Expense. The convention is assumed, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    Asset,
    /// Liability account (credit-normal).
    Liability,
    /// Equity account (credit-normal).
    Equity,
    /// Income account (credit-normal).
    Income,
    /// Expense account (debit-normal).
    Expense,
}

impl AccountType {
    /// All recognized account types, in chart-of-accounts order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Income,
        Self::Expense,
    ];

    /// Returns the lowercase string form used in storage and API payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Returns true if the account type carries a debit-normal balance.
    #[must_use]
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Calculates the net balance from debit and credit totals.
    ///
    /// Debit-normal accounts (asset, expense): `debit - credit`.
    /// Credit-normal accounts (liability, equity, income): `credit - debit`.
    #[must_use]
    pub fn balance(&self, total_debit: Decimal, total_credit: Decimal) -> Decimal {
        if self.is_debit_normal() {
            total_debit - total_credit
        } else {
            total_credit - total_debit
        }
    }
}

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(UnknownAccountType(other.to_string())),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for account type strings outside the five recognized values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

/// Input for a single journal line in a new entry.
///
/// A line conventionally has exactly one of debit/credit non-zero, but this
/// is not enforced. Line order in the input vector becomes the stored
/// position.
#[derive(Debug, Clone, Deserialize)]
pub struct JournalLineInput {
    /// The account to post to.
    #[serde(rename = "accountId")]
    pub account_id: Uuid,
    /// Optional line description.
    pub description: Option<String>,
    /// Debit amount (non-negative).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (non-negative).
    #[serde(default)]
    pub credit: Decimal,
}

/// Debit and credit totals for a journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryTotals {
    /// Total debit amount.
    #[serde(rename = "totalDebit")]
    pub total_debit: Decimal,
    /// Total credit amount.
    #[serde(rename = "totalCredit")]
    pub total_credit: Decimal,
    /// Whether debits equal credits exactly.
    #[serde(rename = "isBalanced")]
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_type_round_trip() {
        for account_type in AccountType::ALL {
            assert_eq!(
                account_type.as_str().parse::<AccountType>().unwrap(),
                account_type
            );
        }
    }

    #[test]
    fn test_account_type_parse_unknown() {
        assert!("revenue".parse::<AccountType>().is_err());
        assert!("".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_normal_balance_sides() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Income.is_debit_normal());
    }

    #[test]
    fn test_balance_calculation() {
        assert_eq!(
            AccountType::Asset.balance(dec!(100), dec!(40)),
            dec!(60)
        );
        assert_eq!(
            AccountType::Income.balance(dec!(10), dec!(100)),
            dec!(90)
        );
    }

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }
}
