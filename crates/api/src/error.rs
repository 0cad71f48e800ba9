//! Maps domain errors onto HTTP responses.
//!
//! Every handler error path funnels through [`ApiError`], so the whole API
//! shares one `{ "error": <code>, "message": <text> }` envelope and one
//! status mapping. Storage failures are logged here and surfaced with a
//! generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use rxledger_db::repositories::account::AccountError;
use rxledger_db::repositories::journal::JournalError;
use rxledger_db::repositories::report::ReportError;
use rxledger_shared::AppError;

/// Response-side wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and use `?` on repository errors;
/// the conversions below route them through the shared taxonomy. Extra
/// payload fields (e.g. the totals of an unbalanced entry) can be attached
/// with [`ApiError::with_field`].
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    extra: serde_json::Map<String, Value>,
}

impl ApiError {
    /// 400 validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into()).into()
    }

    /// 404 not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into()).into()
    }

    /// Attaches an extra field to the JSON envelope.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.extra.insert(key.to_owned(), value);
        }
        self
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            extra: serde_json::Map::new(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        AppError::from(err).into()
    }
}

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        AppError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.error, "Request failed");
        }

        // Internal detail stays out of responses.
        let message = match &self.error {
            AppError::Database(_) | AppError::Internal(_) => "An error occurred",
            other => other.message(),
        };

        let mut body = serde_json::Map::new();
        body.insert("error".to_owned(), self.error.error_code().into());
        body.insert("message".to_owned(), message.into());
        body.extend(self.extra);

        (status, Json(Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_statuses_follow_the_shared_taxonomy() {
        let conflict = ApiError::from(AccountError::DuplicateCode("1000".to_owned()));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let missing = ApiError::from(JournalError::NotFound(Uuid::new_v4()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::validation("bad filter");
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_database_errors_get_a_generic_message() {
        let response = ApiError::from(AppError::Database("connection reset".to_owned()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_extra_fields_land_in_the_envelope() {
        let response = ApiError::validation("Total debits must equal total credits")
            .with_field("totalDebit", dec!(100.00))
            .with_field("totalCredit", dec!(90.00))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["totalDebit"], "100.00");
        assert_eq!(body["totalCredit"], "90.00");
    }
}
