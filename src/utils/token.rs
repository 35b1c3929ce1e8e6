use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::time::now;

pub const SESSION_COOKIE: &str = "token";

/// Payload of a session token. `sub` is the caller identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue_token(user_id: Uuid, username: &str, ttl: Duration, secret: &str) -> Result<String> {
    let issued = now();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iat: issued.timestamp() as usize,
        exp: (issued + ttl).timestamp() as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("token signing failed: {}", e)))
}

/// Any decoding failure, expiry included, means the caller is not signed in.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "session token rejected");
        Error::AuthRequired
    })
}

/// HTTP-only session cookie. Cross-site `SameSite=None` needs `Secure`, so
/// production gets both and development falls back to `Lax`.
pub fn session_cookie(token: String, ttl: Duration, production: bool) -> Cookie<'static> {
    let same_site = if production {
        SameSite::None
    } else {
        SameSite::Lax
    };
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(same_site)
        .max_age(::time::Duration::seconds(ttl.num_seconds()))
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(::time::Duration::ZERO)
        .build()
}
