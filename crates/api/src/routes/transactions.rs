//! Income and expense transaction routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use dompet_core::transaction::TransactionKind;
use dompet_db::{
    TransactionRepository,
    entities::{sea_orm_active_enums::TransactionType, transactions},
    repositories::{TransactionFilter, TransactionInput},
};
use dompet_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::{non_blank, positive_amount};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
};

const REQUIRED: &str = "Type, amount, category, and date are required";

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Earliest date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub end_date: Option<NaiveDate>,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

/// Request body for creating or replacing a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionRequest {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Positive amount.
    pub amount: Option<Decimal>,
    /// Category.
    pub category: Option<String>,
    /// Optional note.
    pub description: Option<String>,
    /// Day the money moved.
    pub date: Option<NaiveDate>,
}

impl TryFrom<TransactionRequest> for TransactionInput {
    type Error = ApiError;

    fn try_from(req: TransactionRequest) -> Result<Self, Self::Error> {
        let (Some(kind), Some(amount), Some(category), Some(date)) = (
            non_blank(req.kind),
            req.amount,
            non_blank(req.category),
            req.date,
        ) else {
            return Err(ApiError::validation(REQUIRED));
        };

        Ok(Self {
            kind: kind.parse::<TransactionKind>()?,
            amount: positive_amount(Some(amount), "amount must be positive")?,
            category,
            description: non_blank(req.description),
            date,
        })
    }
}

/// Transaction as returned by the API.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Owner ID.
    pub user_id: Uuid,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// Category.
    pub category: String,
    /// Optional note.
    pub description: Option<String>,
    /// Day the money moved.
    pub date: NaiveDate,
    /// Created at timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Updated at timestamp.
    pub updated_at: DateTime<FixedOffset>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            kind: model.kind,
            amount: model.amount,
            category: model.category,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions - List the user's transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListTransactionsQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = TransactionFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        kind: non_blank(query.kind)
            .map(|k| k.parse::<TransactionKind>())
            .transpose()?,
        category: non_blank(query.category),
    };

    let transactions: Vec<TransactionResponse> = TransactionRepository::new(Arc::clone(&state.db))
        .list(auth.user_id(), filter)
        .await?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(json!({ "transactions": transactions })))
}

/// GET /transactions/{id} - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
) -> ApiResult<impl IntoResponse> {
    let transaction = TransactionRepository::new(Arc::clone(&state.db))
        .find(auth.user_id(), id)
        .await?;

    Ok(Json(
        json!({ "transaction": TransactionResponse::from(transaction) }),
    ))
}

/// POST /transactions - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<TransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = TransactionInput::try_from(payload)?;

    let transaction = TransactionRepository::new(Arc::clone(&state.db))
        .create(auth.user_id(), input)
        .await?;

    info!(transaction_id = %transaction.id, user_id = %auth.user_id(), "Transaction created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "transaction": TransactionResponse::from(transaction) })),
    ))
}

/// PUT /transactions/{id} - Replace a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
    ApiJson(payload): ApiJson<TransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = TransactionInput::try_from(payload)?;

    let transaction = TransactionRepository::new(Arc::clone(&state.db))
        .update(auth.user_id(), id, input)
        .await?;

    Ok(Json(
        json!({ "transaction": TransactionResponse::from(transaction) }),
    ))
}

/// DELETE /transactions/{id} - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<TransactionId>,
) -> ApiResult<impl IntoResponse> {
    TransactionRepository::new(Arc::clone(&state.db))
        .delete(auth.user_id(), id)
        .await?;

    info!(transaction_id = %id, "Transaction deleted");

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dompet_shared::AppError;
    use rust_decimal_macros::dec;

    fn request() -> TransactionRequest {
        TransactionRequest {
            kind: Some("expense".into()),
            amount: Some(dec!(12.50)),
            category: Some("food".into()),
            description: Some("  ".into()),
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    fn message(err: ApiError) -> String {
        err.0.message().to_string()
    }

    #[test]
    fn test_valid_request_converts() {
        let input = TransactionInput::try_from(request()).unwrap();
        assert_eq!(input.kind, TransactionKind::Expense);
        assert_eq!(input.amount.get(), dec!(12.50));
        assert!(input.description.is_none());
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = TransactionInput::try_from(TransactionRequest {
            category: None,
            ..request()
        })
        .unwrap_err();
        assert_eq!(message(err), REQUIRED);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = TransactionInput::try_from(TransactionRequest {
            kind: Some("transfer".into()),
            ..request()
        })
        .unwrap_err();
        assert!(matches!(err.0, AppError::Validation(_)));
        assert_eq!(message(err), "Type must be either income or expense");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = TransactionInput::try_from(TransactionRequest {
            amount: Some(dec!(-5)),
            ..request()
        })
        .unwrap_err();
        assert_eq!(message(err), "amount must be positive");
    }

    #[test]
    fn test_query_uses_camel_case() {
        let query: ListTransactionsQuery =
            serde_json::from_str(r#"{"startDate":"2024-01-01","type":"income"}"#).unwrap();
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(query.kind.as_deref(), Some("income"));
    }
}
