//!
//! # Repositories
//!
//! Plain functions over the connection pool; one module per table. They
//! take and return data records and keep all SQL out of the services.

pub mod tasks;
pub mod users;
