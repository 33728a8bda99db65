pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, ListTasksQuery, Task, TaskStatus, UpdateTaskRequest};
pub use user::{PublicUser, User};
