pub mod auth_routes;
pub mod candidate_routes;
pub mod health;

use std::time::Duration;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::get_config,
    middleware::{
        auth::require_session,
        cors::client_cors,
        rate_limit::{rate_limit_middleware, RateLimiter},
    },
    AppState,
};

/// Builds the full HTTP surface. Configuration must already be initialised.
pub fn app(state: AppState) -> Router {
    let config = get_config();
    let limiter = RateLimiter::new(
        config.auth_rate_limit,
        Duration::from_secs(config.auth_rate_window_secs),
    );

    let credentials = Router::new()
        .route("/auth/register", post(auth_routes::register))
        .route("/auth/login", post(auth_routes::login))
        .layer(from_fn_with_state(limiter.clone(), rate_limit_middleware));

    let password = Router::new()
        .route("/auth/password", put(auth_routes::change_password))
        .layer(from_fn_with_state(limiter, rate_limit_middleware));

    let session = Router::new()
        .route("/auth/me", get(auth_routes::me))
        .merge(password)
        .route(
            "/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::create_candidate),
        )
        .route("/candidates/summary", get(candidate_routes::candidate_summary))
        .route(
            "/candidates/:id",
            get(candidate_routes::get_candidate)
                .put(candidate_routes::update_candidate)
                .delete(candidate_routes::delete_candidate),
        )
        .route_layer(from_fn(require_session));

    Router::new()
        .route("/health", get(health::health))
        .route("/auth/logout", post(auth_routes::logout))
        .merge(credentials)
        .merge(session)
        .with_state(state)
        .layer(client_cors(&config.client_origin))
        .layer(TraceLayer::new_for_http())
}
