//! Journal entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use rxledger_core::ledger::{JournalLineInput, JournalValidationError, validate_lines};
use rxledger_db::{
    entities::{journal_entries, journal_lines},
    repositories::journal::{CreateJournalEntryInput, EntryWithLines, JournalRepository},
};

/// Default page size for the journal listing.
const DEFAULT_LIMIT: u64 = 50;
/// Largest page size a caller may request.
const MAX_LIMIT: u64 = 500;

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal-entries", get(list_entries).post(create_entry))
        .route("/journal-entries/{id}", get(get_entry))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for listing journal entries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    /// Window start (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Window end (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Maximum rows to return.
    pub limit: Option<u64>,
}

/// Request body for creating a journal entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Entry header fields.
    pub entry: CreateEntryHeader,
    /// Journal lines in display order.
    pub lines: Vec<JournalLineInput>,
}

/// Header fields for a new journal entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryHeader {
    /// Posting date.
    pub entry_date: NaiveDate,
    /// External reference.
    pub reference: Option<String>,
    /// Memo text.
    pub memo: Option<String>,
    /// Originating document type.
    pub source_type: Option<String>,
    /// Originating document ID.
    pub source_id: Option<Uuid>,
}

/// Journal entry header in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Sequential entry number.
    pub entry_number: String,
    /// Posting date.
    pub entry_date: NaiveDate,
    /// External reference.
    pub reference: Option<String>,
    /// Memo text.
    pub memo: Option<String>,
    /// Entry status.
    pub status: String,
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// Originating document type.
    pub source_type: Option<String>,
    /// Originating document ID.
    pub source_id: Option<Uuid>,
}

/// Journal line in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    /// Line ID.
    pub id: Uuid,
    /// Account posted to.
    pub account_id: Uuid,
    /// Line description.
    pub description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Display position.
    pub position: i32,
}

impl From<journal_entries::Model> for EntryResponse {
    fn from(model: journal_entries::Model) -> Self {
        Self {
            id: model.id,
            entry_number: model.entry_number,
            entry_date: model.entry_date,
            reference: model.reference,
            memo: model.memo,
            status: model.status.as_str().to_owned(),
            total_debit: model.total_debit,
            total_credit: model.total_credit,
            source_type: model.source_type,
            source_id: model.source_id,
        }
    }
}

impl From<journal_lines::Model> for LineResponse {
    fn from(model: journal_lines::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            description: model.description,
            debit: model.debit,
            credit: model.credit,
            position: model.position,
        }
    }
}

/// Serializes an entry with its lines.
fn entry_with_lines_json(entry: EntryWithLines) -> serde_json::Value {
    let lines: Vec<LineResponse> = entry.lines.into_iter().map(LineResponse::from).collect();
    json!({
        "entry": EntryResponse::from(entry.entry),
        "lines": lines,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /journal-entries
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = JournalRepository::new((*state.db).clone());
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let entries = repo
        .list_entries(query.start_date, query.end_date, Some(limit))
        .await?;
    let entries: Vec<EntryResponse> = entries.into_iter().map(EntryResponse::from).collect();
    Ok(Json(json!({ "entries": entries })))
}

/// GET /journal-entries/{id}
async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = JournalRepository::new((*state.db).clone());

    let entry = repo
        .find_with_lines(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Journal entry not found"))?;
    Ok(Json(entry_with_lines_json(entry)))
}

/// POST /journal-entries
///
/// Validates the lines before touching the database: every amount must be
/// non-negative and total debits must exactly equal total credits. The
/// header and lines are inserted in one transaction.
async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let totals = validate_lines(&body.lines).map_err(validation_error)?;

    let repo = JournalRepository::new((*state.db).clone());
    let input = CreateJournalEntryInput {
        entry_date: body.entry.entry_date,
        reference: body.entry.reference,
        memo: body.entry.memo,
        source_type: body.entry.source_type,
        source_id: body.entry.source_id,
        created_by: None,
        lines: body.lines,
    };

    let created = repo.create_entry(input, &totals).await?;
    Ok((StatusCode::CREATED, Json(entry_with_lines_json(created))))
}

/// Maps a line validation failure to a 400. Unbalanced entries carry the
/// offending totals in the payload.
fn validation_error(err: JournalValidationError) -> ApiError {
    match err {
        JournalValidationError::Unbalanced {
            total_debit,
            total_credit,
        } => ApiError::validation("Total debits must equal total credits")
            .with_field("totalDebit", total_debit)
            .with_field("totalCredit", total_credit),
        other => ApiError::validation(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_deserializes_entry_and_lines() {
        let body: CreateEntryRequest = serde_json::from_str(
            r#"{
                "entry": {"entryDate": "2026-08-01", "memo": "Monthly rent"},
                "lines": [
                    {"accountId": "00000000-0000-0000-0000-000000000001", "debit": "800.00"},
                    {"accountId": "00000000-0000-0000-0000-000000000002", "credit": "800.00"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.entry.memo.as_deref(), Some("Monthly rent"));
        assert_eq!(body.lines.len(), 2);
        assert_eq!(body.lines[0].debit, dec!(800.00));
        // Omitted amounts default to zero.
        assert_eq!(body.lines[0].credit, Decimal::ZERO);
    }

    #[test]
    fn test_list_query_accepts_camel_case_dates() {
        let query: ListEntriesQuery =
            serde_json::from_str(r#"{"startDate": "2026-01-01", "endDate": "2026-06-30"}"#)
                .unwrap();
        assert!(query.start_date.is_some());
        assert!(query.end_date.is_some());
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_limit_is_defaulted_and_capped() {
        assert_eq!(None::<u64>.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT), 50);
        assert_eq!(Some(10_000).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT), 500);
    }

    #[tokio::test]
    async fn test_unbalanced_entry_reports_totals() {
        let response = validation_error(JournalValidationError::Unbalanced {
            total_debit: dec!(100.00),
            total_credit: dec!(90.00),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["totalDebit"], "100.00");
        assert_eq!(body["totalCredit"], "90.00");
    }
}
