use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Serialize;

use crate::auth::token::TokenData;
use crate::auth::{CurrentUser, LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::models::PublicUser;
use crate::response::ApiResponse;
use crate::services::AuthService;
use crate::validation::validate;

/// Payload shared by signup and login responses.
#[derive(Serialize)]
struct AuthData {
    user: PublicUser,
    token: String,
    #[serde(rename = "expiresIn")]
    expires_in: u64,
}

impl AuthData {
    fn new(user: PublicUser, token: TokenData) -> Self {
        Self {
            user,
            token: token.token,
            expires_in: token.expires_in,
        }
    }
}

/// Register a new user account and issue its first token.
#[post("/signup")]
pub async fn signup(
    service: web::Data<AuthService>,
    body: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    validate(&*body)?;

    let (user, token) = service.signup(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(
        "User registered successfully",
        AuthData::new(user, token),
    )))
}

/// Authenticate with email and password.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    validate(&*body)?;

    let (user, token) = service.login(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        "Login successful",
        AuthData::new(user, token),
    )))
}

/// Profile of the authenticated user.
#[get("")]
pub async fn profile(
    service: web::Data<AuthService>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let user = service.get_profile(current_user.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new("Profile fetched successfully", user)))
}
