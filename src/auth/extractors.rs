use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The authenticated identity attached to a request by `AuthMiddleware`.
///
/// Resolved against the live user store, not just token claims, so the
/// `name` is always current and a deleted user never reaches a handler.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                // Only reachable if a guarded handler is mounted without the
                // middleware; treat it as an unauthenticated request.
                let err = AppError::Unauthorized("Authentication token missing".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
