use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Task status. Corresponds to the `task_status` SQL enum.
///
/// Transitions are free between any pair; the only coupled side effect is
/// the one-time stamping of `completed_at` on first entry into `Completed`
/// (see `TaskService::update`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// A row from the `tasks` table, also the API representation of a task.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /tasks`. Unknown fields are rejected.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// Body of `PATCH /tasks/{id}`. Partial semantics: omitted fields stay
/// untouched. An empty patch is a valid no-op.
///
/// `completed_at` distinguishes "absent" (`None`) from "explicitly null"
/// (`Some(None)`), so a client can clear the stamp on purpose.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    #[serde(default, deserialize_with = "double_option")]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Maps a present-but-null JSON field to `Some(None)` while `#[serde(default)]`
/// keeps an absent field as `None`.
fn double_option<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListTasksQuery {
    /// Defaults page to 1 and limit to 10; non-positive values are coerced up.
    pub fn normalized(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).max(1);
        (page, limit)
    }
}
