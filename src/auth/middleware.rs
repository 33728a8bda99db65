//!
//! # Bearer-Token Gate
//!
//! Guards a scope behind JWT authentication. The token is read from the
//! `Authorization` cookie first, then from an `Authorization: Bearer <token>`
//! header. After signature/expiry verification the token's subject is
//! re-resolved against the live user store, so a soft-deleted user's token
//! stops working immediately. On success a [`CurrentUser`] is attached to
//! request extensions for downstream extractors.
//!
//! Verification runs before any store access: a request with a missing or
//! invalid token is rejected without touching the database.

use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;

use crate::auth::extractors::CurrentUser;
use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::store;

/// Middleware factory; holds the pool and signing secret it was built with.
#[derive(Clone)]
pub struct AuthMiddleware {
    pool: PgPool,
    secret: String,
}

impl AuthMiddleware {
    pub fn new(pool: PgPool, secret: String) -> Self {
        Self { pool, secret }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            pool: self.pool.clone(),
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    pool: PgPool,
    secret: String,
}

/// Cookie takes precedence over the header.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie("Authorization") {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let pool = self.pool.clone();
        let secret = self.secret.clone();

        Box::pin(async move {
            let token = extract_token(&req).ok_or_else(|| {
                Error::from(AppError::Unauthorized("Authentication token missing".into()))
            })?;

            let claims = verify_token(&token, &secret)?;

            let user = store::users::find_active_by_id(&pool, claims.id)
                .await?
                .ok_or_else(|| {
                    Error::from(AppError::Unauthorized(
                        "Invalid authentication token".into(),
                    ))
                })?;

            req.extensions_mut().insert(CurrentUser {
                id: user.id,
                email: user.email,
                name: user.name,
            });

            service.call(req).await
        })
    }
}
