//! Accounting dashboard summary route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;
use crate::error::ApiError;
use rxledger_db::repositories::account::AccountRepository;
use rxledger_db::repositories::journal::JournalRepository;
use rxledger_db::repositories::report::ReportRepository;
use rxledger_shared::AppError;

/// Creates the summary routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounting/summary", get(get_summary))
}

/// Dashboard summary response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Number of accounts in the chart.
    pub total_accounts: u64,
    /// Number of journal entries.
    pub journal_entries: u64,
    /// Cash received from sales this calendar month.
    pub revenue_this_month: Decimal,
    /// Cash spent on expenses this calendar month.
    pub expenses_this_month: Decimal,
}

/// GET /accounting/summary
async fn get_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let db = (*state.db).clone();
    let account_repo = AccountRepository::new(db.clone());
    let journal_repo = JournalRepository::new(db.clone());
    let report_repo = ReportRepository::new(db);

    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let (total_accounts, journal_entries, (revenue, expenses)) = tokio::try_join!(
        async { account_repo.count_accounts().await.map_err(AppError::from) },
        async { journal_repo.count_entries().await.map_err(AppError::from) },
        async {
            report_repo
                .query_cash_flow_sums(month_start, today)
                .await
                .map_err(AppError::from)
        },
    )?;

    Ok(Json(SummaryResponse {
        total_accounts,
        journal_entries,
        revenue_this_month: revenue,
        expenses_this_month: expenses,
    }))
}
