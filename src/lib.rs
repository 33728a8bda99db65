#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "An authenticated REST API for task management: JWT-based signup/login and"]
#![doc = "CRUD over tasks with soft deletion and pagination. This crate holds the"]
#![doc = "domain models, repositories, services, authentication, routing, and error"]
#![doc = "handling; the binary (`main.rs`) wires them into an HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod store;
pub mod validation;
