//! Auth HTTP handlers: register, login, me.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::AuthUser;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// POST /register
///
/// An unreadable body counts as missing fields.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_else(|rejection| {
        debug!(%rejection, "unreadable register body");
        RegisterRequest::default()
    });
    let user_id = state.auth_service().register(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_else(|rejection| {
        debug!(%rejection, "unreadable login body");
        LoginRequest::default()
    });
    let outcome = state.auth_service().login(body).await?;
    Ok(Json(LoginResponse {
        message: "Login successful",
        user: outcome.user,
        token: outcome.token,
    }))
}

/// GET /me — claims of the bearer token.
pub async fn me(AuthUser(claims): AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "id": claims.id,
        "email": claims.email,
        "exp": claims.exp,
    }))
}
