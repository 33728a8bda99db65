use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Task, TaskStatus};

const COLUMNS: &str =
    "id, title, description, status, completed_at, is_deleted, created_at, updated_at";

pub async fn count_active(pool: &PgPool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM tasks WHERE is_deleted = FALSE",
    )
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Non-deleted tasks, newest first.
pub async fn list_active(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE is_deleted = FALSE \
         ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(tasks)
}

pub async fn find_active(pool: &PgPool, id: i32) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1 AND is_deleted = FALSE",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

pub async fn insert(
    pool: &PgPool,
    title: &str,
    description: &str,
    status: TaskStatus,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, status) VALUES ($1, $2, $3) RETURNING {}",
        COLUMNS
    ))
    .bind(title)
    .bind(description)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(task)
}

/// Writes the full post-patch field set; the service computes it. Returns
/// `None` if the row vanished (or was soft-deleted) since it was fetched.
pub async fn update(
    pool: &PgPool,
    id: i32,
    title: &str,
    description: &str,
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $1, description = $2, status = $3, completed_at = $4, \
         updated_at = NOW() WHERE id = $5 AND is_deleted = FALSE RETURNING {}",
        COLUMNS
    ))
    .bind(title)
    .bind(description)
    .bind(status)
    .bind(completed_at)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

/// Marks the row deleted and returns its final representation; `None` if it
/// was already gone, which makes a second delete an ordinary not-found.
pub async fn soft_delete(pool: &PgPool, id: i32) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET is_deleted = TRUE, updated_at = NOW() \
         WHERE id = $1 AND is_deleted = FALSE RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}
