use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::Error;
use crate::utils::token::{verify_token, SESSION_COOKIE};

/// The session cookie wins; a bearer header is accepted for non-browser clients.
fn session_token(req: &Request) -> Option<String> {
    let jar = CookieJar::from_headers(req.headers());
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Verifies the session token and stores its `Claims` as a request extension.
pub async fn require_session(mut req: Request, next: Next) -> Response {
    let Some(token) = session_token(&req) else {
        tracing::debug!(path = %req.uri().path(), "request without session token");
        return Error::AuthRequired.into_response();
    };

    let config = crate::config::get_config();
    match verify_token(&token, &config.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
