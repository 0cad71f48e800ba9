//! Report repository for read-only reporting queries.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use rxledger_core::ledger::AccountType;
use rxledger_core::reports::{AccountActivity, OutstandingSale};
use rxledger_shared::AppError;

use crate::entities::{accounts, expenses, journal_entries, journal_lines, sales,
    sea_orm_active_enums::EntryStatus};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidDateRange { start, end } => {
                Self::Validation(format!("Invalid date range: {start} is after {end}"))
            }
            ReportError::Database(db_err) => Self::Database(db_err.to_string()),
        }
    }
}

/// Repository for reporting queries.
///
/// All methods are read-only; aggregation into report shapes lives in the
/// core crate.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes per-account debit/credit activity from posted journal
    /// lines within an inclusive date window.
    ///
    /// One aggregate query sums the debit and credit columns grouped by
    /// account; no journal line rows leave the database. Accounts are
    /// returned in code order, active accounts with no activity in the
    /// window appear with zero totals, and `types` restricts the result to
    /// the given account types when non-empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from` is after `to`.
    pub async fn query_account_activity(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        types: &[AccountType],
    ) -> Result<Vec<AccountActivity>, ReportError> {
        if let (Some(start), Some(end)) = (from, to)
            && start > end
        {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let mut sums_query = journal_lines::Entity::find()
            .select_only()
            .column(journal_lines::Column::AccountId)
            .column_as(journal_lines::Column::Debit.sum(), "total_debit")
            .column_as(journal_lines::Column::Credit.sum(), "total_credit")
            .inner_join(journal_entries::Entity)
            .filter(journal_entries::Column::Status.eq(EntryStatus::Posted));

        if let Some(from_date) = from {
            sums_query = sums_query.filter(journal_entries::Column::EntryDate.gte(from_date));
        }
        if let Some(to_date) = to {
            sums_query = sums_query.filter(journal_entries::Column::EntryDate.lte(to_date));
        }

        let rows: Vec<(Uuid, Option<Decimal>, Option<Decimal>)> = sums_query
            .group_by(journal_lines::Column::AccountId)
            .into_tuple()
            .all(&self.db)
            .await?;

        let totals: HashMap<Uuid, (Decimal, Decimal)> = rows
            .into_iter()
            .map(|(account_id, debit, credit)| {
                (
                    account_id,
                    (
                        debit.unwrap_or(Decimal::ZERO),
                        credit.unwrap_or(Decimal::ZERO),
                    ),
                )
            })
            .collect();

        let mut query = accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code);
        if !types.is_empty() {
            let db_types: Vec<_> = types
                .iter()
                .map(|t| crate::entities::sea_orm_active_enums::AccountType::from_core(*t))
                .collect();
            query = query.filter(accounts::Column::AccountType.is_in(db_types));
        }
        let account_rows = query.all(&self.db).await?;

        Ok(build_activity(account_rows, &totals))
    }

    /// Sums cash received from sales and cash spent on expenses within an
    /// inclusive date window.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from` is after `to`.
    pub async fn query_cash_flow_sums(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<(Decimal, Decimal), ReportError> {
        if from > to {
            return Err(ReportError::InvalidDateRange {
                start: from,
                end: to,
            });
        }

        let sale_rows: Vec<Decimal> = sales::Entity::find()
            .filter(sales::Column::SaleDate.gte(from))
            .filter(sales::Column::SaleDate.lte(to))
            .select_only()
            .column(sales::Column::AmountPaid)
            .into_tuple()
            .all(&self.db)
            .await?;

        let expense_rows: Vec<Decimal> = expenses::Entity::find()
            .filter(expenses::Column::ExpenseDate.gte(from))
            .filter(expenses::Column::ExpenseDate.lte(to))
            .select_only()
            .column(expenses::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;

        let inflows = sale_rows.into_iter().sum();
        let outflows = expense_rows.into_iter().sum();

        Ok((inflows, outflows))
    }

    /// Finds sales with an outstanding balance (paid less than billed),
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn query_unpaid_sales(&self) -> Result<Vec<OutstandingSale>, ReportError> {
        let rows = sales::Entity::find()
            .filter(Expr::col(sales::Column::AmountPaid).lt(Expr::col(sales::Column::GrandTotal)))
            .order_by_asc(sales::Column::SaleDate)
            .all(&self.db)
            .await?;

        let unpaid = rows
            .into_iter()
            .map(|sale| OutstandingSale {
                sale_id: sale.id,
                invoice_number: sale.invoice_number,
                sale_date: sale.sale_date,
                outstanding: sale.grand_total - sale.amount_paid,
            })
            .collect();

        Ok(unpaid)
    }

}

/// Merges account rows with per-account debit/credit sums into activity
/// records, zero-filling accounts with no activity.
fn build_activity(
    account_rows: Vec<accounts::Model>,
    totals: &HashMap<Uuid, (Decimal, Decimal)>,
) -> Vec<AccountActivity> {
    account_rows
        .into_iter()
        .map(|account| {
            let (total_debit, total_credit) = totals
                .get(&account.id)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            let core_type = account.account_type.to_core();
            AccountActivity {
                account_id: account.id,
                code: account.code,
                name: account.name,
                account_type: core_type.as_str().to_owned(),
                total_debit,
                total_credit,
                balance: core_type.balance(total_debit, total_credit),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::entities::sea_orm_active_enums::AccountType as DbAccountType;

    use super::*;

    fn account(code: &str, account_type: DbAccountType) -> accounts::Model {
        let now = Utc::now().fixed_offset();
        accounts::Model {
            id: Uuid::new_v4(),
            code: code.to_owned(),
            name: format!("Account {code}"),
            account_type,
            subtype: None,
            parent_id: None,
            is_active: true,
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_build_activity_balances_by_normal_side() {
        let cash = account("1000", DbAccountType::Asset);
        let revenue = account("4000", DbAccountType::Income);

        let mut totals = HashMap::new();
        totals.insert(cash.id, (dec!(500.00), dec!(120.00)));
        totals.insert(revenue.id, (dec!(0.00), dec!(500.00)));

        let activity = build_activity(vec![cash, revenue], &totals);

        assert_eq!(activity[0].balance, dec!(380.00));
        assert_eq!(activity[1].balance, dec!(500.00));
        assert_eq!(activity[0].account_type, "asset");
        assert_eq!(activity[1].account_type, "income");
    }

    #[test]
    fn test_build_activity_zero_fills_idle_accounts() {
        let idle = account("2000", DbAccountType::Liability);

        let activity = build_activity(vec![idle], &HashMap::new());

        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].total_debit, Decimal::ZERO);
        assert_eq!(activity[0].total_credit, Decimal::ZERO);
        assert_eq!(activity[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_report_errors_map_to_shared_taxonomy() {
        let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        let bad_range = AppError::from(ReportError::InvalidDateRange { start, end });
        assert_eq!(bad_range.status_code(), 400);
        assert_eq!(bad_range.message(), "Invalid date range: 2026-06-01 is after 2026-01-01");
    }
}
