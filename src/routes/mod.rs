pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Wires the API scopes: signup/login are public, profile and every task
/// route sit behind the bearer-token gate.
pub fn config(guard: AuthMiddleware) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login)
                .service(
                    web::scope("/profile")
                        .wrap(guard.clone())
                        .service(auth::profile),
                ),
        )
        .service(
            web::scope("/tasks")
                .wrap(guard)
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
    }
}
