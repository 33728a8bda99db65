//! Task CRUD, pagination, and soft-delete integration tests.
//!
//! Requires a live Postgres instance; see tests/auth.rs for the setup.

use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::{json, Value};
use sqlx::PgPool;

use taskdeck::auth::AuthMiddleware;
use taskdeck::routes;
use taskdeck::services::{AuthService, TaskService};

const SECRET: &str = "integration_test_secret";

async fn test_pool() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AuthService::new($pool.clone(), SECRET.into())))
                .app_data(web::Data::new(TaskService::new($pool.clone())))
                .app_data(taskdeck::validation::json_config())
                .app_data(taskdeck::validation::path_config())
                .app_data(taskdeck::validation::query_config())
                .service(routes::health::health)
                .service(
                    web::scope("")
                        .configure(routes::config(AuthMiddleware::new($pool.clone(), SECRET.into()))),
                ),
        )
        .await
    };
}

/// Signs a fresh user up and returns a bearer token.
macro_rules! signup_token {
    ($app:expr) => {{
        let email = format!("tasks_{}@example.com", chrono::Utc::now().timestamp_micros());
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(json!({"email": email, "password": "Password123", "name": "Task User"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

#[ignore = "requires a live Postgres database"]
#[actix_rt::test]
async fn test_task_routes_require_authentication() {
    let pool = test_pool().await;
    let app = test_app!(pool);

    // No token: rejected before any store access, so even a nonsense id
    // yields 401, never 404.
    let req = test::TestRequest::get().uri("/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let req = test::TestRequest::get()
        .uri("/tasks/999999")
        .insert_header(("Authorization", "Bearer not.a.valid.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid authentication token");
}

#[ignore = "requires a live Postgres database"]
#[actix_rt::test]
async fn test_task_lifecycle() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let token = signup_token!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    // Create with only a title: defaults apply.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(auth.clone())
        .set_json(json!({"title": "Write spec"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["description"], "");
    assert!(body["data"]["completed_at"].is_null());
    let task_id = body["data"]["id"].as_i64().unwrap();

    // First transition into completed stamps completed_at.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .set_json(json!({"status": "completed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "completed");
    let stamped = body["data"]["completed_at"].as_str().unwrap().to_string();

    // Re-completing leaves the stamp alone.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .set_json(json!({"status": "completed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["completed_at"], stamped.as_str());

    // Leaving completed keeps the stamp too.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .set_json(json!({"status": "in_progress"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "in_progress");
    assert_eq!(body["data"]["completed_at"], stamped.as_str());

    // An explicit completed_at wins over the auto-stamp.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .set_json(json!({"status": "completed", "completed_at": "2026-01-01T00:00:00Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["completed_at"], "2026-01-01T00:00:00Z");

    // An explicit null clears it.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .set_json(json!({"completed_at": null}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["completed_at"].is_null());

    // An empty patch is a valid no-op.
    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Visible in the list (and count) while alive.
    let req = test::TestRequest::get()
        .uri("/tasks?limit=1000")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let total_before = body["pagination"]["total"].as_i64().unwrap();
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|task| task["id"].as_i64() == Some(task_id)));

    // Delete returns the now-deleted representation.
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Task deleted successfully");
    assert_eq!(body["data"]["is_deleted"], true);

    // Gone from the list too: the id no longer appears and the count drops.
    let req = test::TestRequest::get()
        .uri("/tasks?limit=1000")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pagination"]["total"], total_before - 1);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|task| task["id"].as_i64() != Some(task_id)));

    // Gone from reads; a second delete is also 404.
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        format!("Task with id {} not found", task_id)
    );
}

#[ignore = "requires a live Postgres database"]
#[actix_rt::test]
async fn test_task_list_pagination() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let token = signup_token!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    // Start from a clean slate so the counts are exact.
    sqlx::query("DELETE FROM tasks").execute(&pool).await.unwrap();

    for i in 0..7 {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(auth.clone())
            .set_json(json!({"title": format!("Task {}", i)}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/tasks?page=1&limit=3")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Tasks fetched successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["pagination"],
        json!({"total": 7, "page": 1, "limit": 3, "totalPages": 3})
    );
    // Newest first.
    assert_eq!(body["data"][0]["title"], "Task 6");

    // Last page holds the remainder.
    let req = test::TestRequest::get()
        .uri("/tasks?page=3&limit=3")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Task 0");

    // Defaults: page 1, limit 10 covers everything.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[ignore = "requires a live Postgres database"]
#[actix_rt::test]
async fn test_create_task_validation() {
    let pool = test_pool().await;
    let app = test_app!(pool);
    let token = signup_token!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    // Empty title.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(auth.clone())
        .set_json(json!({"title": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    // Unknown extra field.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(auth.clone())
        .set_json(json!({"title": "ok", "owner": "me"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}
