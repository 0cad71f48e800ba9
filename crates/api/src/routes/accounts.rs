//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use rxledger_core::ledger::AccountType;
use rxledger_db::{
    entities::accounts,
    repositories::account::{
        AccountFilter, AccountRepository, CreateAccountInput, UpdateAccountInput,
    },
};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).patch(update_account))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Account type filter (`asset`, `liability`, `equity`, `income`,
    /// `expense`).
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    /// Active status filter.
    pub active: Option<bool>,
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Account code (unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: String,
    /// Account subtype.
    pub subtype: Option<String>,
    /// Parent account ID.
    pub parent_id: Option<Uuid>,
    /// Whether the account is active (defaults to true).
    pub is_active: Option<bool>,
}

/// Request body for updating an account. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    /// New account code.
    pub code: Option<String>,
    /// New account name.
    pub name: Option<String>,
    /// New account type.
    pub account_type: Option<String>,
    /// New subtype (null clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub subtype: Option<Option<String>>,
    /// New parent account (null clears it).
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
    /// New active status.
    pub is_active: Option<bool>,
}

/// Account in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: String,
    /// Account subtype.
    pub subtype: Option<String>,
    /// Parent account ID.
    pub parent_id: Option<Uuid>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Cached balance.
    pub balance: Decimal,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            account_type: model.account_type.to_core().as_str().to_owned(),
            subtype: model.subtype,
            parent_id: model.parent_id,
            is_active: model.is_active,
            balance: model.balance,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /accounts
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account_type = query
        .account_type
        .as_deref()
        .map(require_account_type)
        .transpose()?;

    let filter = AccountFilter {
        account_type,
        is_active: query.active,
    };

    let accounts = repo.list_accounts(filter).await?;
    let accounts: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(json!({ "accounts": accounts })))
}

/// GET /accounts/{id}
async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;
    Ok(Json(AccountResponse::from(account)))
}

/// POST /accounts
async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account_type = require_account_type(&body.account_type)?;

    if body.code.trim().is_empty() || body.name.trim().is_empty() {
        return Err(ApiError::validation("Account code and name are required"));
    }

    let input = CreateAccountInput {
        code: body.code,
        name: body.name,
        account_type,
        subtype: body.subtype,
        parent_id: body.parent_id,
        is_active: body.is_active.unwrap_or(true),
    };

    let account = repo.create_account(input).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// PATCH /accounts/{id}
async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account_type = body
        .account_type
        .as_deref()
        .map(require_account_type)
        .transpose()?;

    let input = UpdateAccountInput {
        code: body.code,
        name: body.name,
        account_type,
        subtype: body.subtype,
        parent_id: body.parent_id,
        is_active: body.is_active,
    };

    let account = repo.update_account(id, input).await?;
    Ok(Json(AccountResponse::from(account)))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Parses an account type string into the database enum.
fn parse_account_type(raw: &str) -> Option<rxledger_db::entities::sea_orm_active_enums::AccountType> {
    raw.parse::<AccountType>()
        .ok()
        .map(rxledger_db::entities::sea_orm_active_enums::AccountType::from_core)
}

/// Parses an account type string, rejecting unknown types with a 400.
fn require_account_type(
    raw: &str,
) -> Result<rxledger_db::entities::sea_orm_active_enums::AccountType, ApiError> {
    parse_account_type(raw)
        .ok_or_else(|| ApiError::validation(format!("Unknown account type: {raw}")))
}
