//! Credential storage: unique-by-email user records.

use async_trait::async_trait;

use crate::db::{self, DbPool, StoreError};
use crate::models::user::{NewUser, User};

/// Durable, unique-keyed storage of user records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new user and return it with its assigned id.
    /// Fails with [`StoreError::DuplicateEmail`] when the email is already taken.
    async fn create(&self, user: NewUser<'_>) -> Result<User, StoreError>;

    /// `Ok(None)` when no user has this exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// [`CredentialStore`] over the SQLite `users` table.
#[derive(Clone)]
pub struct SqlCredentialStore {
    pool: DbPool,
}

impl SqlCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqlCredentialStore {
    async fn create(&self, user: NewUser<'_>) -> Result<User, StoreError> {
        let row = db::user_create(
            &self.pool,
            user.name,
            user.email,
            user.password_hash,
            user.phone,
            user.phone_code,
        )
        .await?;
        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(db::user_find_by_email(&self.pool, email).await?.map(User::from))
    }
}
