pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::Deserialize;
use validator::Validate;

pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, Claims, TokenData, TOKEN_TTL_SECS};

/// Body of `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    /// Must be a syntactically valid email address.
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    /// 6 to 50 characters.
    #[validate(length(min = 6, max = 50, message = "must be between 6 and 50 characters"))]
    pub password: String,
    /// 2 to 100 characters.
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    pub name: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}
