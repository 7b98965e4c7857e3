//! Authentication routes for register, login, profile and logout.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use dompet_core::auth::{
    PasswordError, check_password, hash_password, require_credentials, validate_registration,
};
use dompet_db::{
    UserRepository,
    entities::users,
    repositories::{CreateUserInput, UserError},
};
use dompet_shared::{
    AppError,
    auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo, UserProfile},
};
use serde_json::json;
use tracing::info;

use super::non_blank;
use crate::{
    AppState,
    error::ApiResult,
    extractors::ApiJson,
    middleware::AuthUser,
};


/// Public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Auth routes that need a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        avatar_url: user.avatar_url,
    }
}

/// POST /auth/register - Create an account and return a token.
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let credentials = validate_registration(payload.email.as_deref(), payload.password.as_deref())?;
    let password_hash = hash_password(credentials.password)?;

    let user = UserRepository::new(Arc::clone(&state.db))
        .create(CreateUserInput {
            email: credentials.email.to_string(),
            password_hash,
            full_name: non_blank(payload.full_name),
        })
        .await?;

    let token = state.jwt_service.generate_token(user.id, &user.email)?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user_info(user),
            token,
        }),
    ))
}

/// POST /auth/login - Check credentials and return a token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let credentials = require_credentials(payload.email.as_deref(), payload.password.as_deref())?;

    let user = UserRepository::new(Arc::clone(&state.db))
        .find_by_email(credentials.email)
        .await
        .map_err(UserError::from)?;

    let Some(user) = user else {
        info!("Login attempt for unknown email");
        return Err(PasswordError::Mismatch.into());
    };

    check_password(credentials.password, &user.password_hash).inspect_err(|e| {
        if matches!(e, PasswordError::Mismatch) {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
        }
    })?;

    let token = state.jwt_service.generate_token(user.id, &user.email)?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user_info(user),
        token,
    }))
}

/// GET /auth/me - Current user's profile.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let user = UserRepository::new(Arc::clone(&state.db))
        .find_by_id(auth.user_id())
        .await
        .map_err(UserError::from)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let profile = UserProfile {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        avatar_url: user.avatar_url,
        created_at: user.created_at.with_timezone(&Utc),
    };

    Ok(Json(json!({ "user": profile })))
}

/// POST /auth/logout - Tokens are stateless; the client discards its copy.
async fn logout(auth: AuthUser) -> impl IntoResponse {
    info!(user_id = %auth.user_id(), "User logged out");
    Json(json!({ "message": "Logged out successfully" }))
}
