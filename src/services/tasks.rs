//!
//! # Task Service
//!
//! CRUD and pagination over the task repository. Update carries the one
//! piece of coupled behavior in the system: the first transition into
//! `completed` stamps `completed_at`, and only an explicit `completed_at`
//! in a later patch can change or clear it.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};
use crate::response::Pagination;
use crate::store;

#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
}

/// The full post-patch column set written back by an update.
#[derive(Debug, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Applies partial-update semantics: only fields present in the patch
/// change. The status-driven `completed_at` default is evaluated first,
/// then an explicit `completed_at` in the patch overrides it.
pub fn resolve_update(task: &Task, patch: &UpdateTaskRequest, now: DateTime<Utc>) -> TaskChanges {
    let mut changes = TaskChanges {
        title: patch.title.clone().unwrap_or_else(|| task.title.clone()),
        description: patch
            .description
            .clone()
            .unwrap_or_else(|| task.description.clone()),
        status: patch.status.unwrap_or(task.status),
        completed_at: task.completed_at,
    };

    if let Some(status) = patch.status {
        if status == TaskStatus::Completed && changes.completed_at.is_none() {
            changes.completed_at = Some(now);
        }
    }

    if let Some(explicit) = patch.completed_at {
        changes.completed_at = explicit;
    }

    changes
}

fn task_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Task with id {} not found", id))
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of non-deleted tasks, newest first, with the pagination
    /// envelope. `page` and `limit` are already coerced to positive values
    /// by the caller.
    pub async fn list(&self, page: i64, limit: i64) -> Result<(Vec<Task>, Pagination), AppError> {
        let offset = (page - 1) * limit;
        let total = store::tasks::count_active(&self.pool).await?;
        let tasks = store::tasks::list_active(&self.pool, limit, offset).await?;

        Ok((tasks, Pagination::new(total, page, limit)))
    }

    pub async fn get(&self, id: i32) -> Result<Task, AppError> {
        store::tasks::find_active(&self.pool, id)
            .await?
            .ok_or_else(|| task_not_found(id))
    }

    pub async fn create(&self, request: CreateTaskRequest) -> Result<Task, AppError> {
        let description = request.description.unwrap_or_default();
        let status = request.status.unwrap_or_default();

        store::tasks::insert(&self.pool, &request.title, &description, status).await
    }

    /// Partial update. An empty patch is a valid no-op that still refreshes
    /// `updated_at`. Concurrent updates are last-write-wins.
    pub async fn update(&self, id: i32, patch: UpdateTaskRequest) -> Result<Task, AppError> {
        let task = store::tasks::find_active(&self.pool, id)
            .await?
            .ok_or_else(|| task_not_found(id))?;

        let changes = resolve_update(&task, &patch, Utc::now());

        store::tasks::update(
            &self.pool,
            id,
            &changes.title,
            &changes.description,
            changes.status,
            changes.completed_at,
        )
        .await?
        .ok_or_else(|| task_not_found(id))
    }

    /// Soft delete; a second delete on the same id is NotFound.
    pub async fn delete(&self, id: i32) -> Result<Task, AppError> {
        store::tasks::soft_delete(&self.pool, id)
            .await?
            .ok_or_else(|| task_not_found(id))
    }
}
