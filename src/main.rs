use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use taskdeck::auth::AuthMiddleware;
use taskdeck::config::Config;
use taskdeck::logging::ErrorLogger;
use taskdeck::routes;
use taskdeck::services::{AuthService, TaskService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    // A failed connection at startup is fatal; there are no retries.
    let pool = PgPoolOptions::new()
        .min_connections(0)
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(10))
        .connect(&config.database_url())
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let auth_service = AuthService::new(pool.clone(), config.secret_key.clone());
    let task_service = TaskService::new(pool.clone());
    let guard = AuthMiddleware::new(pool.clone(), config.secret_key.clone());

    let bind_addr = config.bind_addr();
    info!("Starting taskdeck server at http://{}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = if config.cors_origin == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            let mut cors = Cors::default()
                .allowed_origin(&config.cors_origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);
            if config.cors_credentials {
                cors = cors.supports_credentials();
            }
            cors
        };

        App::new()
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(task_service.clone()))
            // Malformed bodies, paths, and query strings get the same
            // envelope as validation failures instead of the framework
            // default.
            .app_data(taskdeck::validation::json_config())
            .app_data(taskdeck::validation::path_config())
            .app_data(taskdeck::validation::query_config())
            .wrap(middleware::Logger::default())
            .wrap(ErrorLogger)
            .wrap(middleware::Compress::default())
            .wrap(cors)
            .service(routes::health::health)
            .service(
                web::scope(&config.api_base_path).configure(routes::config(guard.clone())),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
