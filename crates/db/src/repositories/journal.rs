//! Journal repository for journal entry database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
    UpdateMany,
};
use uuid::Uuid;

use rxledger_core::ledger::{EntryTotals, JournalLineInput};
use rxledger_shared::AppError;

use crate::entities::{
    accounts, journal_entries, journal_lines, sea_orm_active_enums::EntryStatus,
};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// A line references an account that does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::NotFound(_) => Self::NotFound("Journal entry not found".to_owned()),
            JournalError::AccountNotFound(id) => {
                Self::Validation(format!("Account not found: {id}"))
            }
            JournalError::Database(db_err) => Self::Database(db_err.to_string()),
        }
    }
}

/// Input for creating a journal entry with its lines.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// Posting date.
    pub entry_date: NaiveDate,
    /// Optional external reference.
    pub reference: Option<String>,
    /// Optional memo.
    pub memo: Option<String>,
    /// Originating document type (e.g. "sale").
    pub source_type: Option<String>,
    /// Originating document ID.
    pub source_id: Option<Uuid>,
    /// Creating user.
    pub created_by: Option<Uuid>,
    /// The journal lines, in display order.
    pub lines: Vec<JournalLineInput>,
}

/// A journal entry together with its lines, position ascending.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The entry's lines.
    pub lines: Vec<journal_lines::Model>,
}

/// Repository for journal entry queries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists journal entries, newest posting date first, optionally
    /// restricted to an inclusive date window and capped at `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<u64>,
    ) -> Result<Vec<journal_entries::Model>, JournalError> {
        let mut query = journal_entries::Entity::find()
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::EntryNumber)
            .limit(limit);

        if let Some(from_date) = from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from_date));
        }
        if let Some(to_date) = to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to_date));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Finds a journal entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_lines(&self, id: Uuid) -> Result<Option<EntryWithLines>, JournalError> {
        let Some(entry) = journal_entries::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::JournalId.eq(id))
            .order_by_asc(journal_lines::Column::Position)
            .all(&self.db)
            .await?;

        Ok(Some(EntryWithLines { entry, lines }))
    }

    /// Counts all journal entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_entries(&self) -> Result<u64, JournalError> {
        Ok(journal_entries::Entity::find().count(&self.db).await?)
    }

    /// Creates a journal entry and its lines atomically.
    ///
    /// Header and lines are inserted in one database transaction, and each
    /// line's effect is folded into the account's cached balance. Callers
    /// must have validated the lines (balanced, non-negative) beforehand;
    /// the totals argument carries the validated sums.
    ///
    /// Entry numbers come from the current maximum inside the transaction,
    /// so two concurrent posts can race to the same number. The unique
    /// constraint catches the loser and the insert is retried with a fresh
    /// number.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if a line references a missing account.
    pub async fn create_entry(
        &self,
        input: CreateJournalEntryInput,
        totals: &EntryTotals,
    ) -> Result<EntryWithLines, JournalError> {
        let mut attempts = 0;
        loop {
            match self.try_create_entry(input.clone(), totals).await {
                Err(JournalError::Database(db_err))
                    if attempts < ENTRY_NUMBER_RETRIES
                        && matches!(
                            db_err.sql_err(),
                            Some(SqlErr::UniqueConstraintViolation(_))
                        ) =>
                {
                    attempts += 1;
                }
                other => return other,
            }
        }
    }

    async fn try_create_entry(
        &self,
        input: CreateJournalEntryInput,
        totals: &EntryTotals,
    ) -> Result<EntryWithLines, JournalError> {
        let txn = self.db.begin().await?;

        let entry_number = self.next_entry_number(&txn).await?;
        let now = Utc::now().into();

        let entry = journal_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            entry_number: Set(entry_number),
            entry_date: Set(input.entry_date),
            reference: Set(input.reference),
            memo: Set(input.memo),
            status: Set(EntryStatus::Posted),
            total_debit: Set(totals.total_debit),
            total_credit: Set(totals.total_credit),
            source_type: Set(input.source_type),
            source_id: Set(input.source_id),
            created_by: Set(input.created_by),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for (position, line) in input.lines.iter().enumerate() {
            let account = accounts::Entity::find_by_id(line.account_id)
                .one(&txn)
                .await?
                .ok_or(JournalError::AccountNotFound(line.account_id))?;

            // Fold the line into the cached account balance per the
            // account's normal side. The update is a column expression so
            // concurrent posts cannot lose each other's deltas.
            let delta = account
                .account_type
                .to_core()
                .balance(line.debit, line.credit);
            apply_balance_delta(line.account_id, delta, now)
                .exec(&txn)
                .await?;

            let position = i32::try_from(position).unwrap_or(i32::MAX);
            let inserted = journal_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                journal_id: Set(entry.id),
                account_id: Set(line.account_id),
                description: Set(line.description.clone()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                position: Set(position),
            }
            .insert(&txn)
            .await?;
            lines.push(inserted);
        }

        txn.commit().await?;

        Ok(EntryWithLines { entry, lines })
    }

    /// Generates the next sequential entry number from the current maximum.
    async fn next_entry_number(&self, txn: &DatabaseTransaction) -> Result<String, JournalError> {
        let latest: Option<String> = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::EntryNumber)
            .order_by_desc(journal_entries::Column::EntryNumber)
            .into_tuple()
            .one(txn)
            .await?;

        Ok(format_entry_number(next_sequence(latest.as_deref())))
    }
}

/// Retries after an entry-number collision between concurrent posts.
const ENTRY_NUMBER_RETRIES: u32 = 3;

/// Formats a sequence number as an entry number (`JE-000001`, ...).
fn format_entry_number(sequence: u64) -> String {
    format!("JE-{sequence:06}")
}

/// Returns the sequence following the latest allocated entry number.
///
/// Numbers that do not parse (or an empty journal) restart the sequence
/// at 1.
fn next_sequence(latest: Option<&str>) -> u64 {
    latest
        .and_then(|number| number.strip_prefix("JE-"))
        .and_then(|digits| digits.parse::<u64>().ok())
        .map_or(1, |sequence| sequence + 1)
}

/// Builds the atomic `balance = balance + delta` update for one account.
fn apply_balance_delta(
    account_id: Uuid,
    delta: Decimal,
    now: DateTimeWithTimeZone,
) -> UpdateMany<accounts::Entity> {
    accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(delta),
        )
        .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
        .filter(accounts::Column::Id.eq(account_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_number_is_zero_padded() {
        assert_eq!(format_entry_number(1), "JE-000001");
        assert_eq!(format_entry_number(42), "JE-000042");
        assert_eq!(format_entry_number(123_456), "JE-123456");
    }

    #[test]
    fn test_entry_number_grows_past_padding() {
        assert_eq!(format_entry_number(1_000_000), "JE-1000000");
    }

    #[test]
    fn test_next_sequence_follows_latest_number() {
        assert_eq!(next_sequence(None), 1);
        assert_eq!(next_sequence(Some("JE-000042")), 43);
        assert_eq!(next_sequence(Some("JE-999999")), 1_000_000);
    }

    #[test]
    fn test_next_sequence_restarts_on_unparseable_number() {
        assert_eq!(next_sequence(Some("OPENING")), 1);
        assert_eq!(next_sequence(Some("JE-abc")), 1);
    }

    #[test]
    fn test_balance_delta_adds_in_place() {
        use rust_decimal_macros::dec;
        use sea_orm::{DbBackend, QueryTrait};

        let sql = apply_balance_delta(Uuid::nil(), dec!(25.50), Utc::now().into())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""balance" = "balance" +"#), "{sql}");
        assert!(sql.contains("25.5"), "{sql}");
    }

    #[test]
    fn test_journal_errors_map_to_shared_taxonomy() {
        let missing = AppError::from(JournalError::NotFound(Uuid::new_v4()));
        assert_eq!(missing.status_code(), 404);

        let bad_account = AppError::from(JournalError::AccountNotFound(Uuid::new_v4()));
        assert_eq!(bad_account.status_code(), 400);
        assert_eq!(bad_account.error_code(), "VALIDATION_ERROR");
    }
}
