//! User repository: the only table this service owns.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;

/// Persisted user row. Carries the password hash, so it is never serialized;
/// outward responses go through [`crate::models::UserProfile`].
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
    pub institution: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user. `created_at` is stamped by [`user_create`].
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub user_type: &'a str,
    pub institution: Option<&'a str>,
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, user_type, institution, created_at";

/// Insert a user and return its id. A duplicate email surfaces as
/// [`AppError::Conflict`] straight from the UNIQUE constraint, so concurrent
/// registrations with the same email cannot both succeed.
pub async fn user_create(pool: &DbPool, user: NewUser<'_>) -> AppResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, user_type, institution, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.user_type)
    .bind(user.institution)
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("Email already registered".to_string())
        }
        other => AppError::Db(other),
    })?;
    Ok(result.last_insert_rowid())
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn user_get_by_id(pool: &DbPool, id: i64) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
