use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token lifetime: 24 hours, reported to clients as `expiresIn`.
pub const TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

/// Claims carried by a bearer token: the minimal identity plus expiry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: i32,
    pub email: String,
    pub exp: usize,
}

/// A freshly issued token together with its lifetime in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct TokenData {
    pub token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}

/// Signs a token for the given identity with the process-wide secret.
pub fn issue_token(id: i32, email: &str, secret: &str) -> Result<TokenData, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(TOKEN_TTL_SECS as i64))
        .ok_or_else(|| AppError::Internal("Token expiry overflow".into()))?
        .timestamp() as usize;

    let claims = Claims {
        id,
        email: email.to_owned(),
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))?;

    Ok(TokenData {
        token,
        expires_in: TOKEN_TTL_SECS,
    })
}

/// Verifies signature and expiry, returning the decoded claims.
///
/// Every failure mode (malformed, bad signature, expired) collapses to the
/// same `Unauthorized` so callers leak nothing about why the token failed.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid authentication token".into()))
}
