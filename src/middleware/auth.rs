//! Bearer token extractor.

use axum::http::header::AUTHORIZATION;
use tracing::debug;

use crate::auth::Claims;
use crate::error::AppError;
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extractor: verified claims from the `Authorization: Bearer` header.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .ok_or_else(|| {
                debug!("rejected request: missing bearer token");
                AppError::Unauthorized("Missing or invalid Authorization header".to_string())
            })?;
        let claims = state.jwt_secret().validate(token)?;
        Ok(AuthUser(claims))
    }
}
