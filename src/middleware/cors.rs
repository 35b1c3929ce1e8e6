use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::{Any, CorsLayer};

/// Credentialed CORS for the browser client. Cookies cannot be sent to a
/// wildcard origin, so an unparsable origin falls back to a permissive
/// layer without credentials.
pub fn client_cors(origin: &str) -> CorsLayer {
    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        Err(_) => {
            tracing::warn!(origin = %origin, "invalid CLIENT_ORIGIN, using permissive CORS");
            CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any)
        }
    }
}
