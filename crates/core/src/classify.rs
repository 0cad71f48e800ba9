//! Account classification.
//!
//! Two classification strategies exist side by side and are deliberately
//! kept distinct: bucketing by the account's declared type, and bucketing by
//! the numeric code range the chart-of-accounts convention assigns to each
//! type. They agree only when the chart follows the code convention, so
//! callers pick one explicitly.

use std::collections::HashMap;
use thiserror::Error;

use crate::ledger::AccountType;
use crate::reports::AccountActivity;

/// How to select accounts for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationMode {
    /// Match accounts whose declared type equals the given type.
    ByType(AccountType),
    /// Match accounts whose numeric code falls in the inclusive range.
    ByCodeRange {
        /// Lowest matching code.
        min: u32,
        /// Highest matching code.
        max: u32,
    },
}

/// Error for unparseable account filter strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid account filter: {0}")]
pub struct InvalidAccountFilter(pub String);

impl ClassificationMode {
    /// Parses a filter string from the `accountFilter` query parameter.
    ///
    /// Accepts an account type name (`"asset"`, `"income"`, ...) or an
    /// inclusive code range (`"1000-1999"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is neither a recognized type nor a
    /// well-formed range.
    pub fn parse(s: &str) -> Result<Self, InvalidAccountFilter> {
        let s = s.trim();
        if let Ok(account_type) = s.parse::<AccountType>() {
            return Ok(Self::ByType(account_type));
        }

        if let Some((min, max)) = s.split_once('-') {
            let min: u32 = min
                .trim()
                .parse()
                .map_err(|_| InvalidAccountFilter(s.to_string()))?;
            let max: u32 = max
                .trim()
                .parse()
                .map_err(|_| InvalidAccountFilter(s.to_string()))?;
            if min > max {
                return Err(InvalidAccountFilter(s.to_string()));
            }
            return Ok(Self::ByCodeRange { min, max });
        }

        Err(InvalidAccountFilter(s.to_string()))
    }

    /// Returns true if the account matches this classification.
    ///
    /// In code-range mode, accounts with non-numeric codes never match.
    #[must_use]
    pub fn matches(&self, account: &AccountActivity) -> bool {
        match self {
            Self::ByType(account_type) => account.account_type == account_type.as_str(),
            Self::ByCodeRange { min, max } => account
                .code
                .parse::<u32>()
                .is_ok_and(|code| code >= *min && code <= *max),
        }
    }
}

/// Filters accounts by classification mode, preserving input order.
///
/// Callers supply rows already sorted by code ascending (the aggregation
/// queries return them that way), so display order survives filtering.
#[must_use]
pub fn classify(mode: ClassificationMode, accounts: Vec<AccountActivity>) -> Vec<AccountActivity> {
    accounts.into_iter().filter(|a| mode.matches(a)).collect()
}

/// Partitions accounts into per-type buckets.
///
/// Accounts whose type string is not one of the five recognized values are
/// excluded from every bucket and therefore from every report built on the
/// partition.
#[must_use]
pub fn partition_by_type(
    accounts: Vec<AccountActivity>,
) -> HashMap<AccountType, Vec<AccountActivity>> {
    let mut buckets: HashMap<AccountType, Vec<AccountActivity>> = HashMap::new();

    for account in accounts {
        if let Ok(account_type) = account.account_type.parse::<AccountType>() {
            buckets.entry(account_type).or_default().push(account);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn make_account(code: &str, account_type: &str) -> AccountActivity {
        AccountActivity {
            account_id: Uuid::new_v4(),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type: account_type.to_string(),
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_parse_type_filter() {
        assert_eq!(
            ClassificationMode::parse("asset").unwrap(),
            ClassificationMode::ByType(AccountType::Asset)
        );
        assert_eq!(
            ClassificationMode::parse("Income").unwrap(),
            ClassificationMode::ByType(AccountType::Income)
        );
    }

    #[test]
    fn test_parse_range_filter() {
        assert_eq!(
            ClassificationMode::parse("1000-1999").unwrap(),
            ClassificationMode::ByCodeRange {
                min: 1000,
                max: 1999
            }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ClassificationMode::parse("revenue").is_err());
        assert!(ClassificationMode::parse("1999-1000").is_err());
        assert!(ClassificationMode::parse("10a0-2000").is_err());
        assert!(ClassificationMode::parse("").is_err());
    }

    #[test]
    fn test_classify_by_type_preserves_order() {
        let accounts = vec![
            make_account("1000", "asset"),
            make_account("1100", "asset"),
            make_account("2000", "liability"),
            make_account("1200", "asset"),
        ];
        let result = classify(
            ClassificationMode::ByType(AccountType::Asset),
            accounts,
        );
        let codes: Vec<&str> = result.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "1100", "1200"]);
    }

    #[test]
    fn test_classify_by_code_range_skips_non_numeric() {
        let accounts = vec![
            make_account("1000", "asset"),
            make_account("CASH", "asset"),
            make_account("1999", "asset"),
            make_account("2000", "liability"),
        ];
        let result = classify(
            ClassificationMode::ByCodeRange {
                min: 1000,
                max: 1999,
            },
            accounts,
        );
        let codes: Vec<&str> = result.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "1999"]);
    }

    #[test]
    fn test_partition_drops_unrecognized_types() {
        let accounts = vec![
            make_account("1000", "asset"),
            make_account("4000", "income"),
            make_account("9000", "suspense"),
            make_account("9100", ""),
        ];
        let partition = partition_by_type(accounts);

        let total: usize = partition.values().map(Vec::len).sum();
        assert_eq!(total, 2);
        assert_eq!(partition[&AccountType::Asset].len(), 1);
        assert_eq!(partition[&AccountType::Income].len(), 1);
        // Unrecognized types appear in no bucket.
        assert!(!partition.values().flatten().any(|a| a.code == "9000"));
    }
}
