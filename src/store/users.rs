use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

const COLUMNS: &str = "id, email, password, name, is_deleted, created_at, updated_at";

/// Looks a user up by email across *all* rows, soft-deleted included.
/// Signup uses this for its uniqueness check, so a soft-deleted user's
/// email permanently blocks re-signup (preserved observed behavior).
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_active_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1 AND is_deleted = FALSE",
        COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_active_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1 AND is_deleted = FALSE",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn insert(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, password, name) VALUES ($1, $2, $3) RETURNING {}",
        COLUMNS
    ))
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(user)
}
