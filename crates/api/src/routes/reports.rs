//! Financial report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;
use crate::error::ApiError;
use rxledger_core::classify::{ClassificationMode, classify, partition_by_type};
use rxledger_core::ledger::AccountType;
use rxledger_core::reports::{AccountActivity, ReportService};
use rxledger_db::repositories::journal::JournalRepository;
use rxledger_db::repositories::report::ReportRepository;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/trial-balance", get(get_trial_balance))
        .route("/reports/pnl", get(get_profit_and_loss))
        .route("/reports/balance-sheet", get(get_balance_sheet))
        .route("/reports/cash-flow", get(get_cash_flow))
        .route("/reports/aging-analysis", get(get_aging_analysis))
        .route("/reports/chart-of-accounts", get(get_chart_of_accounts))
        .route("/reports/journal-entries", get(get_journal_entries_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for ranged reports.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    /// Window start (inclusive). Defaults to January 1 of the current year.
    pub start_date: Option<NaiveDate>,
    /// Window end (inclusive). Defaults to today.
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for the trial balance report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceQuery {
    /// Window start (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Window end (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Account filter: a type name (`asset`) or a code range (`1000-1999`).
    pub account_filter: Option<String>,
}

/// Query parameters for as-of reports.
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// Snapshot date. Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Resolves a date window, defaulting to year start / today.
fn resolve_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let today = Utc::now().date_naive();
    let year_start =
        NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    (start.unwrap_or(year_start), end.unwrap_or(today))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /reports/trial-balance
async fn get_trial_balance(
    State(state): State<AppState>,
    Query(query): Query<TrialBalanceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (start_date, end_date) = resolve_window(query.start_date, query.end_date);

    let mode = query
        .account_filter
        .as_deref()
        .map(ClassificationMode::parse)
        .transpose()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let repo = ReportRepository::new((*state.db).clone());
    let activity = repo
        .query_account_activity(Some(start_date), Some(end_date), &[])
        .await?;

    let activity = match mode {
        Some(mode) => classify(mode, activity),
        None => activity,
    };

    let report = ReportService::generate_trial_balance(start_date, end_date, activity);
    Ok(Json(report))
}

/// GET /reports/pnl
async fn get_profit_and_loss(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (start_date, end_date) = resolve_window(query.start_date, query.end_date);

    let repo = ReportRepository::new((*state.db).clone());
    let activity = repo
        .query_account_activity(
            Some(start_date),
            Some(end_date),
            &[AccountType::Income, AccountType::Expense],
        )
        .await?;

    let report = ReportService::generate_profit_and_loss(start_date, end_date, activity);
    Ok(Json(report))
}

/// GET /reports/balance-sheet
async fn get_balance_sheet(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let as_of = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let repo = ReportRepository::new((*state.db).clone());
    let activity = repo
        .query_account_activity(
            None,
            Some(as_of),
            &[
                AccountType::Asset,
                AccountType::Liability,
                AccountType::Equity,
            ],
        )
        .await?;

    let report = ReportService::generate_balance_sheet(as_of, activity);
    Ok(Json(report))
}

/// GET /reports/cash-flow
async fn get_cash_flow(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (start_date, end_date) = resolve_window(query.start_date, query.end_date);

    let repo = ReportRepository::new((*state.db).clone());
    let (inflows, outflows) = repo.query_cash_flow_sums(start_date, end_date).await?;

    let report = ReportService::generate_cash_flow(
        start_date,
        end_date,
        inflows,
        outflows,
        state.config.reports.beginning_cash,
    );
    Ok(Json(report))
}

/// GET /reports/aging-analysis
async fn get_aging_analysis(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let as_of = Utc::now().date_naive();

    let repo = ReportRepository::new((*state.db).clone());
    let sales = repo.query_unpaid_sales().await?;

    let report = ReportService::generate_aging_analysis(as_of, sales);
    Ok(Json(report))
}

/// Chart-of-accounts section in responses.
#[derive(Debug, Default, Serialize)]
pub struct ChartSection {
    /// Accounts in the section, code ascending.
    pub accounts: Vec<AccountActivity>,
    /// Sum of account balances in the section.
    pub total: Decimal,
}

/// GET /reports/chart-of-accounts
///
/// Full-history activity for every active account, partitioned by type.
async fn get_chart_of_accounts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let activity = repo.query_account_activity(None, None, &[]).await?;

    let mut buckets = partition_by_type(activity);
    let mut sections = serde_json::Map::new();
    for account_type in AccountType::ALL {
        let accounts = buckets.remove(&account_type).unwrap_or_default();
        let total: Decimal = accounts.iter().map(|a| a.balance).sum();
        let section = ChartSection { accounts, total };
        sections.insert(
            account_type.as_str().to_owned(),
            serde_json::to_value(section).unwrap_or_default(),
        );
    }
    Ok(Json(json!({ "sections": sections })))
}

/// GET /reports/journal-entries
///
/// Journal listing report: every entry in the window, newest first, with
/// the summed debit and credit columns.
async fn get_journal_entries_report(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (start_date, end_date) = resolve_window(query.start_date, query.end_date);

    let repo = JournalRepository::new((*state.db).clone());
    let entries = repo
        .list_entries(Some(start_date), Some(end_date), None)
        .await?;

    let total_debits: Decimal = entries.iter().map(|e| e.total_debit).sum();
    let total_credits: Decimal = entries.iter().map(|e| e.total_credit).sum();
    let entries: Vec<super::journal_entries::EntryResponse> = entries
        .into_iter()
        .map(super::journal_entries::EntryResponse::from)
        .collect();

    Ok(Json(json!({
        "startDate": start_date,
        "endDate": end_date,
        "entries": entries,
        "totalDebits": total_debits,
        "totalCredits": total_credits,
    })))
}
