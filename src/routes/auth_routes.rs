use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;

use crate::{
    config::get_config,
    dto::auth_dto::{
        AuthResponse, ChangePasswordPayload, LoginPayload, MessageResponse, RegisterPayload,
        UserProfile,
    },
    error::{Error, Result},
    utils::token::{expired_session_cookie, issue_token, session_cookie, Claims},
    validation::auth_schema,
    AppState,
};

const REGISTER_TOKEN_TTL_HOURS: i64 = 1;

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created", body = Json<AuthResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Username or email already taken"),
        (status = 429, description = "Too many attempts")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: std::result::Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let payload = payload.normalized();
    auth_schema::check_register(&payload)?;

    let user = state.auth_service.register(&payload).await?;

    let config = get_config();
    let ttl = Duration::hours(REGISTER_TOKEN_TTL_HOURS);
    let token = issue_token(user.id, &user.username, ttl, &config.jwt_secret)?;
    let jar = jar.add(session_cookie(token.clone(), ttl, config.is_production()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            user: UserProfile::from(user),
            token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Signed in, session cookie set", body = Json<AuthResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Invalid email or password"),
        (status = 429, description = "Too many attempts")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let payload = payload.normalized();
    auth_schema::check_login(&payload)?;

    let user = state
        .auth_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let config = get_config();
    let ttl = Duration::hours(config.session_ttl_hours);
    let token = issue_token(user.id, &user.username, ttl, &config.jwt_secret)?;
    let jar = jar.add(session_cookie(token.clone(), ttl, config.is_production()));

    tracing::info!(user_id = %user.id, "recruiter signed in");
    Ok((
        jar,
        Json(AuthResponse {
            user: UserProfile::from(user),
            token,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current recruiter", body = Json<UserProfile>),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    // A valid token for a deleted account is treated as signed out.
    let user = state
        .auth_service
        .find_by_id(claims.sub)
        .await?
        .ok_or(Error::AuthRequired)?;
    Ok(Json(UserProfile::from(user)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = Json<MessageResponse>)
    )
)]
#[axum::debug_handler]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_session_cookie());
    (jar, Json(MessageResponse::new("Logged out successfully")))
}

#[utoipa::path(
    put,
    path = "/auth/password",
    request_body = ChangePasswordPayload,
    responses(
        (status = 200, description = "Password changed", body = Json<MessageResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not signed in or wrong current password"),
        (status = 429, description = "Too many attempts")
    )
)]
#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: std::result::Result<Json<ChangePasswordPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    auth_schema::check_change_password(&payload)?;

    state
        .auth_service
        .change_password(claims.sub, &payload.current_password, &payload.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
