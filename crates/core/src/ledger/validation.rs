//! Business rule validation for journal entries.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{EntryTotals, JournalLineInput};

/// Validation errors for journal entry creation.
#[derive(Debug, Error)]
pub enum JournalValidationError {
    /// Entry has no lines.
    #[error("Journal entry must have at least one line")]
    NoLines,

    /// A line has a negative debit or credit amount.
    #[error("Line {position} has a negative amount")]
    NegativeAmount {
        /// Zero-based line position.
        position: usize,
    },

    /// Entry debits do not equal credits.
    #[error("Journal entry is unbalanced: debits ({total_debit}) != credits ({total_credit})")]
    Unbalanced {
        /// Total debit amount.
        total_debit: Decimal,
        /// Total credit amount.
        total_credit: Decimal,
    },
}

/// Validates journal lines and returns their totals.
///
/// Rules:
/// - at least one line
/// - debit and credit amounts are non-negative
/// - total debits equal total credits exactly
///
/// A line carrying both a debit and a credit is accepted; one-sidedness is
/// a convention, not a rule.
///
/// # Errors
///
/// Returns an error when any rule is violated. The unbalanced variant
/// carries both computed totals for diagnostics.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, JournalValidationError> {
    if lines.is_empty() {
        return Err(JournalValidationError::NoLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (position, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalValidationError::NegativeAmount { position });
        }
        total_debit += line.debit;
        total_credit += line.credit;
    }

    if total_debit != total_credit {
        return Err(JournalValidationError::Unbalanced {
            total_debit,
            total_credit,
        });
    }

    Ok(EntryTotals::new(total_debit, total_credit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_line(debit: Decimal, credit: Decimal) -> JournalLineInput {
        JournalLineInput {
            account_id: Uuid::new_v4(),
            description: None,
            debit,
            credit,
        }
    }

    #[test]
    fn test_balanced_lines() {
        let lines = vec![
            make_line(dec!(100.00), Decimal::ZERO),
            make_line(Decimal::ZERO, dec!(100.00)),
        ];
        let totals = validate_lines(&lines).unwrap();
        assert_eq!(totals.total_debit, dec!(100.00));
        assert_eq!(totals.total_credit, dec!(100.00));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_unbalanced_lines_carry_totals() {
        let lines = vec![
            make_line(dec!(100.00), Decimal::ZERO),
            make_line(Decimal::ZERO, dec!(99.99)),
        ];
        match validate_lines(&lines) {
            Err(JournalValidationError::Unbalanced {
                total_debit,
                total_credit,
            }) => {
                assert_eq!(total_debit, dec!(100.00));
                assert_eq!(total_credit, dec!(99.99));
            }
            other => panic!("expected Unbalanced, got {other:?}"),
        }
    }

    #[test]
    fn test_no_lines() {
        assert!(matches!(
            validate_lines(&[]),
            Err(JournalValidationError::NoLines)
        ));
    }

    #[test]
    fn test_negative_amount() {
        let lines = vec![
            make_line(dec!(-1.00), Decimal::ZERO),
            make_line(Decimal::ZERO, dec!(-1.00)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(JournalValidationError::NegativeAmount { position: 0 })
        ));
    }

    #[test]
    fn test_two_sided_line_accepted() {
        // One line with both sides set still balances; convention only.
        let lines = vec![make_line(dec!(25.00), dec!(25.00))];
        assert!(validate_lines(&lines).is_ok());
    }
}
