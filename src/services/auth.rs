//! Registration and login policy.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::auth::{hash_password, verify_password, JwtSecret};
use crate::error::{AppError, AppResult};
use crate::models::user::{LoginOutcome, LoginRequest, NewUser, RegisterRequest, UserInfo};
use crate::services::credentials::CredentialStore;

pub const REGISTER_FIELDS_REQUIRED: &str = "All fields are required";
pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required";

/// Registers users and authenticates them against a [`CredentialStore`].
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    jwt: JwtSecret,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, jwt: JwtSecret) -> Self {
        Self { store, jwt }
    }

    pub fn jwt(&self) -> &JwtSecret {
        &self.jwt
    }

    /// Validate, hash, store. Returns the new user's id.
    ///
    /// A duplicate email is reported as [`AppError::Registration`], the same as any other
    /// storage failure.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<i64> {
        let required = || AppError::Validation(REGISTER_FIELDS_REQUIRED.to_string());
        req.validate().map_err(|_| required())?;
        let (Some(name), Some(email), Some(password), Some(phone), Some(phone_code)) =
            (req.name, req.email, req.password, req.phone, req.phone_code)
        else {
            return Err(required());
        };

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Hashing(e.to_string()))??;

        let user = self
            .store
            .create(NewUser {
                name: &name,
                email: &email,
                password_hash: &password_hash,
                phone: &phone,
                phone_code: &phone_code,
            })
            .await
            .map_err(AppError::Registration)?;

        info!(user_id = user.id, "user registered");
        Ok(user.id)
    }

    /// Validate, look up, verify, issue a token.
    ///
    /// Unknown email and wrong password both yield [`AppError::InvalidCredentials`].
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginOutcome> {
        let required = || AppError::Validation(LOGIN_FIELDS_REQUIRED.to_string());
        req.validate().map_err(|_| required())?;
        let (Some(email), Some(password)) = (req.email, req.password) else {
            return Err(required());
        };

        let user = match self.store.find_by_email(&email).await.map_err(AppError::Lookup)? {
            Some(user) => user,
            None => {
                debug!("login rejected: no such email");
                return Err(AppError::InvalidCredentials);
            }
        };

        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;
        if !matches {
            debug!(user_id = user.id, "login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.id, &user.email)?;
        info!(user_id = user.id, "user logged in");

        Ok(LoginOutcome {
            user: UserInfo::from(&user),
            token,
        })
    }
}
