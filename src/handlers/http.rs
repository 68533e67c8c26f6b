//! Shared state and the health probe.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::auth::JwtSecret;
use crate::db::DbPool;
use crate::services::AuthService;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }
    pub fn jwt_secret(&self) -> &JwtSecret {
        self.auth_service.jwt()
    }
}

/// GET /health — liveness probe; also checks the database answers.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    if let Err(e) = sqlx::query("SELECT 1").execute(state.db()).await {
        tracing::warn!(error = %e, "health check: database unavailable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "service": "accounts" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "accounts" })),
    )
}
