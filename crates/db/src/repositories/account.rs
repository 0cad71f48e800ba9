//! Account repository for chart-of-accounts database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use rxledger_shared::AppError;

use crate::entities::{accounts, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateCode(code) => {
                Self::Conflict(format!("Account code already exists: {code}"))
            }
            AccountError::ParentNotFound(id) => {
                Self::Validation(format!("Parent account not found: {id}"))
            }
            AccountError::NotFound(_) => Self::NotFound("Account not found".to_owned()),
            AccountError::Database(db_err) => Self::Database(db_err.to_string()),
        }
    }
}

/// Filter for listing accounts.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Filter by active status.
    pub is_active: Option<bool>,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype.
    pub subtype: Option<String>,
    /// Parent account for hierarchy.
    pub parent_id: Option<Uuid>,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Input for updating an account. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New account code.
    pub code: Option<String>,
    /// New account name.
    pub name: Option<String>,
    /// New account type.
    pub account_type: Option<AccountType>,
    /// New subtype (set or clear).
    pub subtype: Option<Option<String>>,
    /// New parent (set or clear).
    pub parent_id: Option<Option<Uuid>>,
    /// New active status.
    pub is_active: Option<bool>,
}

/// Repository for chart-of-accounts queries.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists accounts matching the filter, ordered by code ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find().order_by_asc(accounts::Column::Code);

        if let Some(account_type) = filter.account_type {
            query = query.filter(accounts::Column::AccountType.eq(account_type));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(accounts::Column::IsActive.eq(is_active));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Counts all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_accounts(&self) -> Result<u64, AccountError> {
        Ok(accounts::Entity::find().count(&self.db).await?)
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode` if the code is taken and `ParentNotFound`
    /// if the parent reference is dangling.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        if self.code_exists(&input.code, None).await? {
            return Err(AccountError::DuplicateCode(input.code));
        }

        if let Some(parent_id) = input.parent_id {
            self.find_by_id(parent_id)
                .await?
                .ok_or(AccountError::ParentNotFound(parent_id))?;
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(input.account_type),
            subtype: Set(input.subtype),
            parent_id: Set(input.parent_id),
            is_active: Set(input.is_active),
            balance: Set(rust_decimal::Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Updates an account with patch semantics.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist and `DuplicateCode`
    /// if a new code collides with another account.
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        if let Some(code) = &input.code
            && *code != existing.code
            && self.code_exists(code, Some(id)).await?
        {
            return Err(AccountError::DuplicateCode(code.clone()));
        }

        if let Some(Some(parent_id)) = input.parent_id {
            self.find_by_id(parent_id)
                .await?
                .ok_or(AccountError::ParentNotFound(parent_id))?;
        }

        let mut account: accounts::ActiveModel = existing.into();
        if let Some(code) = input.code {
            account.code = Set(code);
        }
        if let Some(name) = input.name {
            account.name = Set(name);
        }
        if let Some(account_type) = input.account_type {
            account.account_type = Set(account_type);
        }
        if let Some(subtype) = input.subtype {
            account.subtype = Set(subtype);
        }
        if let Some(parent_id) = input.parent_id {
            account.parent_id = Set(parent_id);
        }
        if let Some(is_active) = input.is_active {
            account.is_active = Set(is_active);
        }
        account.updated_at = Set(Utc::now().into());

        Ok(account.update(&self.db).await?)
    }

    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, AccountError> {
        let mut query = accounts::Entity::find().filter(accounts::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(accounts::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_errors_map_to_shared_taxonomy() {
        let dup = AppError::from(AccountError::DuplicateCode("1000".to_owned()));
        assert_eq!(dup.status_code(), 409);
        assert_eq!(dup.error_code(), "CONFLICT");

        let parent = AppError::from(AccountError::ParentNotFound(Uuid::new_v4()));
        assert_eq!(parent.status_code(), 400);

        let missing = AppError::from(AccountError::NotFound(Uuid::new_v4()));
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.message(), "Account not found");
    }
}
