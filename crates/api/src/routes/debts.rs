//! Debt and receivable routes, including partial payments.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use dompet_core::ledger::{DebtKind, DebtStatus};
use dompet_db::{
    DebtRepository,
    repositories::{CreateDebtInput, UpdateDebtInput},
};
use dompet_shared::types::DebtId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{non_blank, non_negative_amount, positive_amount};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, ApiPath},
    middleware::AuthUser,
};

const CREATE_REQUIRED: &str = "type, person_name and amount are required";
const UPDATE_REQUIRED: &str = "type, person_name, amount and remaining_amount are required";
const PAYMENT_REQUIRED: &str = "payment_amount is required and must be positive";

/// Creates the debt routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/debts", get(list_debts).post(create_debt))
        .route("/debts/{id}", put(update_debt).delete(delete_debt))
        .route("/debts/{id}/payment", post(pay_debt))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for recording a debt.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDebtRequest {
    /// `debt` or `receivable`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Counterparty.
    pub person_name: Option<String>,
    /// Original amount.
    pub amount: Option<Decimal>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional note.
    pub description: Option<String>,
}

/// Request body for replacing a debt.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDebtRequest {
    /// `debt` or `receivable`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Counterparty.
    pub person_name: Option<String>,
    /// Original amount.
    pub amount: Option<Decimal>,
    /// Outstanding balance.
    pub remaining_amount: Option<Decimal>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional note.
    pub description: Option<String>,
    /// `active` or `paid`; defaults to `active`.
    pub status: Option<String>,
}

/// Request body for a payment.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentRequest {
    /// Amount paid.
    pub payment_amount: Option<Decimal>,
}

impl TryFrom<CreateDebtRequest> for CreateDebtInput {
    type Error = ApiError;

    fn try_from(req: CreateDebtRequest) -> Result<Self, Self::Error> {
        let (Some(kind), Some(person_name), Some(amount)) =
            (non_blank(req.kind), non_blank(req.person_name), req.amount)
        else {
            return Err(ApiError::validation(CREATE_REQUIRED));
        };

        Ok(Self {
            kind: kind.parse::<DebtKind>()?,
            person_name,
            amount: positive_amount(Some(amount), "amount must be positive")?,
            due_date: req.due_date,
            description: non_blank(req.description),
        })
    }
}

impl TryFrom<UpdateDebtRequest> for UpdateDebtInput {
    type Error = ApiError;

    fn try_from(req: UpdateDebtRequest) -> Result<Self, Self::Error> {
        let (Some(kind), Some(person_name)) = (non_blank(req.kind), non_blank(req.person_name))
        else {
            return Err(ApiError::validation(UPDATE_REQUIRED));
        };

        let status = match non_blank(req.status) {
            Some(status) => status.parse::<DebtStatus>()?,
            None => DebtStatus::default(),
        };

        Ok(Self {
            kind: kind.parse::<DebtKind>()?,
            person_name,
            amount: positive_amount(req.amount, UPDATE_REQUIRED)?,
            remaining_amount: non_negative_amount(req.remaining_amount, UPDATE_REQUIRED)?,
            due_date: req.due_date,
            description: non_blank(req.description),
            status,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /debts - List the user's debts and receivables.
async fn list_debts(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let debts = DebtRepository::new(Arc::clone(&state.db))
        .list(auth.user_id())
        .await?;

    Ok(Json(json!({ "debts": debts })))
}

/// POST /debts - Record a debt with its full amount outstanding.
async fn create_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateDebtRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = CreateDebtInput::try_from(payload)?;

    let debt = DebtRepository::new(Arc::clone(&state.db))
        .create(auth.user_id(), input)
        .await?;

    info!(debt_id = %debt.id, user_id = %auth.user_id(), "Debt created");

    Ok((StatusCode::CREATED, Json(json!({ "debt": debt }))))
}

/// PUT /debts/{id} - Replace every field of a debt.
async fn update_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DebtId>,
    ApiJson(payload): ApiJson<UpdateDebtRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = UpdateDebtInput::try_from(payload)?;

    let debt = DebtRepository::new(Arc::clone(&state.db))
        .update(auth.user_id(), id, input)
        .await?;

    Ok(Json(json!({ "debt": debt })))
}

/// POST /debts/{id}/payment - Apply a partial or full payment.
async fn pay_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DebtId>,
    ApiJson(payload): ApiJson<PaymentRequest>,
) -> ApiResult<impl IntoResponse> {
    let payment = positive_amount(payload.payment_amount, PAYMENT_REQUIRED)?;

    let debt = DebtRepository::new(Arc::clone(&state.db))
        .apply_payment(auth.user_id(), id, payment)
        .await?;

    Ok(Json(json!({ "debt": debt })))
}

/// DELETE /debts/{id} - Delete a debt.
async fn delete_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<DebtId>,
) -> ApiResult<impl IntoResponse> {
    DebtRepository::new(Arc::clone(&state.db))
        .delete(auth.user_id(), id)
        .await?;

    info!(debt_id = %id, "Debt deleted");

    Ok(Json(json!({ "ok": true })))
}
