//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod journal_entries;
pub mod reports;
pub mod summary;

/// Creates the API router with all routes nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(summary::routes())
        .merge(accounts::routes())
        .merge(journal_entries::routes())
        .merge(reports::routes())
}
