//! Token issuance and verification
//!
//! Access tokens are HMAC-SHA256 signed JWTs carrying the user id as the
//! subject plus issued-at and expiry timestamps. Verification is stateless;
//! revocation before natural expiry is the blacklist's job.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
}

/// Token generation and verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Expired token. Please login to get a new token")]
    Expired,

    #[error("Invalid token. Please register or login")]
    Invalid,

    #[error("Failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    #[error("System time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),
}

/// Generate a signed access token for a user
pub fn generate_token(secret: &str, ttl_secs: u64, user_id: i64) -> Result<String, TokenError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + ttl_secs,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify a token's signature and expiry, returning the subject user id
pub fn decode_token(secret: &str, token: &str) -> Result<i64, TokenError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    Ok(token_data.claims.sub)
}
