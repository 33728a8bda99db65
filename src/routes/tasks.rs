use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};

use crate::error::AppError;
use crate::models::{CreateTaskRequest, ListTasksQuery, UpdateTaskRequest};
use crate::response::ApiResponse;
use crate::services::TaskService;
use crate::validation::validate;

/// One page of non-deleted tasks, newest first, with pagination metadata.
#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    query: web::Query<ListTasksQuery>,
) -> Result<impl Responder, AppError> {
    let (page, limit) = query.normalized();
    let (tasks, pagination) = service.list(page, limit).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        "Tasks fetched successfully",
        tasks,
        pagination,
    )))
}

#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = service.get(task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new("Task fetched successfully", task)))
}

#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    body: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    validate(&*body)?;

    let task = service.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::new("Task created successfully", task)))
}

/// Partial update; an empty body is a valid no-op.
#[patch("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
    body: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    validate(&*body)?;

    let task = service.update(task_id.into_inner(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new("Task updated successfully", task)))
}

/// Soft delete; returns the now-deleted representation.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = service.delete(task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new("Task deleted successfully", task)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool never touches the network; path and query extraction fail
    // before any handler or store code runs, so these tests need no database.
    fn lazy_service() -> web::Data<TaskService> {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/unused")
            .unwrap();
        web::Data::new(TaskService::new(pool))
    }

    #[actix_rt::test]
    async fn test_unparseable_path_id_yields_error_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(lazy_service())
                .app_data(crate::validation::path_config())
                .service(web::scope("/tasks").service(get_task)),
        )
        .await;

        let req = test::TestRequest::get().uri("/tasks/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 400);
        assert!(body["message"].is_string());
    }

    #[actix_rt::test]
    async fn test_unparseable_query_yields_error_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(lazy_service())
                .app_data(crate::validation::query_config())
                .service(web::scope("/tasks").service(list_tasks)),
        )
        .await;

        let req = test::TestRequest::get().uri("/tasks?page=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 400);
    }
}
