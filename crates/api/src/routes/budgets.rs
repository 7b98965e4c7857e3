//! Budget management routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use dompet_core::budget::BudgetPeriod;
use dompet_db::{BudgetRepository, repositories::BudgetInput};
use dompet_shared::types::BudgetId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{non_blank, positive_amount};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, ApiPath},
    middleware::AuthUser,
};

const REQUIRED: &str = "Category, amount, and period are required";

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/{id}", put(update_budget).delete(delete_budget))
}

/// Request body for creating or replacing a budget.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetRequest {
    /// Category the limit applies to.
    pub category: Option<String>,
    /// Limit per period.
    pub amount: Option<Decimal>,
    /// `weekly`, `monthly` or `yearly`.
    pub period: Option<String>,
}

impl TryFrom<BudgetRequest> for BudgetInput {
    type Error = ApiError;

    fn try_from(req: BudgetRequest) -> Result<Self, Self::Error> {
        let (Some(category), Some(amount), Some(period)) =
            (non_blank(req.category), req.amount, non_blank(req.period))
        else {
            return Err(ApiError::validation(REQUIRED));
        };

        Ok(Self {
            period: period.parse::<BudgetPeriod>()?,
            amount: positive_amount(Some(amount), "amount must be positive")?,
            category,
        })
    }
}

/// GET /budgets - List the user's budgets.
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let budgets = BudgetRepository::new(Arc::clone(&state.db))
        .list(auth.user_id())
        .await?;

    Ok(Json(json!({ "budgets": budgets })))
}

/// POST /budgets - Create a budget.
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<BudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = BudgetInput::try_from(payload)?;

    let budget = BudgetRepository::new(Arc::clone(&state.db))
        .create(auth.user_id(), input)
        .await?;

    info!(budget_id = %budget.id, category = %budget.category, "Budget created");

    Ok((StatusCode::CREATED, Json(json!({ "budget": budget }))))
}

/// PUT /budgets/{id} - Replace a budget.
async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BudgetId>,
    ApiJson(payload): ApiJson<BudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = BudgetInput::try_from(payload)?;

    let budget = BudgetRepository::new(Arc::clone(&state.db))
        .update(auth.user_id(), id, input)
        .await?;

    Ok(Json(json!({ "budget": budget })))
}

/// DELETE /budgets/{id} - Delete a budget.
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<BudgetId>,
) -> ApiResult<impl IntoResponse> {
    BudgetRepository::new(Arc::clone(&state.db))
        .delete(auth.user_id(), id)
        .await?;

    Ok(Json(json!({ "message": "Budget deleted successfully" })))
}
