//! API route definitions.

use axum::{Router, http::StatusCode, middleware, response::Response};
use dompet_shared::{
    AppError,
    types::{AmountError, NonNegativeAmount, PositiveAmount},
};
use rust_decimal::Decimal;

use crate::{AppState, error::error_response, middleware::auth_middleware};

pub mod auth;
pub mod budgets;
pub mod debts;
pub mod health;
pub mod savings;
pub mod transactions;

/// Creates the API router, wrapping owned-record routes in the auth middleware.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(transactions::routes())
        .merge(budgets::routes())
        .merge(debts::routes())
        .merge(savings::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

/// Returns the trimmed string, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Requires a strictly positive amount.
///
/// A missing or non-positive value yields `message`; other range failures
/// report their own reason.
pub(crate) fn positive_amount(
    value: Option<Decimal>,
    message: &str,
) -> Result<PositiveAmount, AppError> {
    let value = value.ok_or_else(|| AppError::Validation(message.to_string()))?;
    PositiveAmount::new(value).map_err(|e| match e {
        AmountError::NotPositive => AppError::Validation(message.to_string()),
        other => other.into(),
    })
}

/// Requires an amount that is zero or more.
pub(crate) fn non_negative_amount(
    value: Option<Decimal>,
    message: &str,
) -> Result<NonNegativeAmount, AppError> {
    let value = value.ok_or_else(|| AppError::Validation(message.to_string()))?;
    Ok(NonNegativeAmount::new(value)?)
}
