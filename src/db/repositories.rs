//! Repositories: users.

use sqlx::FromRow;

use super::DbPool;

/// Failure of a repository call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The `users.email` uniqueness constraint rejected the insert.
    #[error("UNIQUE constraint failed: users.email")]
    DuplicateEmail,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

// ---- User ----

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub phone_code: String,
}

/// Insert a user. Email uniqueness is left to the table constraint, so two racing inserts of the
/// same email resolve to exactly one row.
pub async fn user_create(
    pool: &DbPool,
    name: &str,
    email: &str,
    password_hash: &str,
    phone: &str,
    phone_code: &str,
) -> Result<UserRow, StoreError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, phone, phone_code)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(phone)
    .bind(phone_code)
    .execute(pool)
    .await
    .map_err(|e| {
        if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
            StoreError::DuplicateEmail
        } else {
            StoreError::Db(e)
        }
    })?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        phone: phone.to_string(),
        phone_code: phone_code.to_string(),
    })
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> Result<Option<UserRow>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, password_hash, phone, phone_code FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
