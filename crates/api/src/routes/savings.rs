//! Savings goal routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use dompet_db::{SavingsRepository, repositories::SavingsGoalInput};
use dompet_shared::types::{NonNegativeAmount, SavingsGoalId};
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

const CREATE_REQUIRED: &str = "name and target_amount are required";
const UPDATE_REQUIRED: &str = "name, target_amount and current_amount are required";
const ADD_REQUIRED: &str = "amount is required and must be positive";

/// Creates the savings routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/savings", get(list_savings).post(create_saving))
        .route("/savings/{id}", put(update_saving).delete(delete_saving))
        .route("/savings/{id}/add", post(add_to_saving))
}

/// Request body for creating or replacing a savings goal.
#[derive(Debug, Default, Deserialize)]
pub struct SavingsRequest {
    /// Goal name.
    pub name: Option<String>,
    /// Target to save toward.
    pub target_amount: Option<Decimal>,
    /// Saved so far. Optional on create.
    pub current_amount: Option<Decimal>,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
}

/// Request body for a contribution.
#[derive(Debug, Default, Deserialize)]
pub struct AddAmountRequest {
    /// Amount to add.
    pub amount: Option<Decimal>,
}

impl SavingsRequest {
    fn into_create_input(self) -> Result<SavingsGoalInput, ApiError> {
        let Some(name) = non_blank(self.name) else {
            return Err(ApiError::validation(CREATE_REQUIRED));
        };

        let current_amount = match self.current_amount {
            Some(value) => NonNegativeAmount::new(value)?,
            None => NonNegativeAmount::ZERO,
        };

        Ok(SavingsGoalInput {
            name,
            target_amount: positive_amount(self.target_amount, CREATE_REQUIRED)?,
            current_amount,
            deadline: self.deadline,
        })
    }

    fn into_update_input(self) -> Result<SavingsGoalInput, ApiError> {
        let Some(name) = non_blank(self.name) else {
            return Err(ApiError::validation(UPDATE_REQUIRED));
        };

        Ok(SavingsGoalInput {
            name,
            target_amount: positive_amount(self.target_amount, UPDATE_REQUIRED)?,
            current_amount: non_negative_amount(self.current_amount, UPDATE_REQUIRED)?,
            deadline: self.deadline,
        })
    }
}

/// GET /savings - List the user's savings goals.
async fn list_savings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let savings = SavingsRepository::new(Arc::clone(&state.db))
        .list(auth.user_id())
        .await?;

    Ok(Json(json!({ "savings": savings })))
}

/// POST /savings - Create a savings goal.
async fn create_saving(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<SavingsRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.into_create_input()?;

    let saving = SavingsRepository::new(Arc::clone(&state.db))
        .create(auth.user_id(), input)
        .await?;

    info!(savings_goal_id = %saving.id, user_id = %auth.user_id(), "Savings goal created");

    Ok((StatusCode::CREATED, Json(json!({ "saving": saving }))))
}

/// PUT /savings/{id} - Replace every field of a savings goal.
async fn update_saving(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<SavingsGoalId>,
    ApiJson(payload): ApiJson<SavingsRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = payload.into_update_input()?;

    let saving = SavingsRepository::new(Arc::clone(&state.db))
        .update(auth.user_id(), id, input)
        .await?;

    Ok(Json(json!({ "saving": saving })))
}

/// POST /savings/{id}/add - Add a contribution. Totals above target are allowed.
async fn add_to_saving(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<SavingsGoalId>,
    ApiJson(payload): ApiJson<AddAmountRequest>,
) -> ApiResult<impl IntoResponse> {
    let amount = positive_amount(payload.amount, ADD_REQUIRED)?;

    let saving = SavingsRepository::new(Arc::clone(&state.db))
        .add_amount(auth.user_id(), id, amount)
        .await?;

    Ok(Json(json!({ "saving": saving })))
}

/// DELETE /savings/{id} - Delete a savings goal.
async fn delete_saving(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<SavingsGoalId>,
) -> ApiResult<impl IntoResponse> {
    SavingsRepository::new(Arc::clone(&state.db))
        .delete(auth.user_id(), id)
        .await?;

    Ok(Json(json!({ "ok": true })))
}
