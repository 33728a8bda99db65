//!
//! # Auth Service
//!
//! Signup, login, and profile lookup against the user repository and the
//! password/token utilities. bcrypt work is pushed onto the blocking thread
//! pool so a burst of logins cannot stall the async executor.

use actix_web::web;
use sqlx::PgPool;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{issue_token, TokenData};
use crate::auth::{LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::models::PublicUser;
use crate::store;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    secret: String,
}

impl AuthService {
    pub fn new(pool: PgPool, secret: String) -> Self {
        Self { pool, secret }
    }

    /// Creates an account and issues a token for it.
    ///
    /// The uniqueness check matches on email regardless of `is_deleted`,
    /// while login and profile only see non-deleted users. A soft-deleted
    /// user's email therefore blocks re-signup forever; kept as observed
    /// behavior.
    pub async fn signup(
        &self,
        request: SignupRequest,
    ) -> Result<(PublicUser, TokenData), AppError> {
        if store::users::find_by_email(&self.pool, &request.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                request.email
            )));
        }

        let password = request.password;
        let password_hash = web::block(move || hash_password(&password)).await??;

        let user =
            store::users::insert(&self.pool, &request.email, &password_hash, &request.name)
                .await?;

        let token = issue_token(user.id, &user.email, &self.secret)?;

        Ok((PublicUser::from(&user), token))
    }

    /// Authenticates by email and password.
    ///
    /// Unknown (or soft-deleted) email and wrong password produce the same
    /// error so the response never reveals which check failed.
    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<(PublicUser, TokenData), AppError> {
        let invalid = || AppError::Unauthorized("Invalid email or password".into());

        let user = store::users::find_active_by_email(&self.pool, &request.email)
            .await?
            .ok_or_else(invalid)?;

        let password = request.password;
        let stored_hash = user.password.clone();
        let password_ok =
            web::block(move || verify_password(&password, &stored_hash)).await??;

        if !password_ok {
            return Err(invalid());
        }

        let token = issue_token(user.id, &user.email, &self.secret)?;

        Ok((PublicUser::from(&user), token))
    }

    /// Profile of a non-deleted user, without the password hash.
    pub async fn get_profile(&self, user_id: i32) -> Result<PublicUser, AppError> {
        let user = store::users::find_active_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(PublicUser::from(&user))
    }
}
