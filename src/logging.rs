//!
//! # Error Logging Middleware
//!
//! Logs every error response as
//! `[{method}] {path} >> StatusCode:: {status}, Message:: {message}`
//! before it leaves the server. Success traffic is covered by the standard
//! access logger; this middleware only speaks up on failures.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::error;

#[derive(Clone, Default)]
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ErrorLoggerService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerService { service }))
    }
}

pub struct ErrorLoggerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await;
            match &res {
                Ok(res) if res.status().is_client_error() || res.status().is_server_error() => {
                    let message = res
                        .response()
                        .error()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    error!(
                        "[{}] {} >> StatusCode:: {}, Message:: {}",
                        method,
                        path,
                        res.status().as_u16(),
                        message
                    );
                }
                Err(err) => {
                    let status = err.as_response_error().status_code();
                    error!(
                        "[{}] {} >> StatusCode:: {}, Message:: {}",
                        method,
                        path,
                        status.as_u16(),
                        err
                    );
                }
                Ok(_) => {}
            }
            res
        })
    }
}
