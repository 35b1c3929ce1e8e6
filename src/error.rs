use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::utils::token::expired_session_cookie;
use crate::validation::FieldIssue;

pub type Result<T> = std::result::Result<T, Error>;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    FieldInvalid(Vec<FieldIssue>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("No fields provided for update")]
    NoFieldsProvided,

    #[error("{message}")]
    DuplicateUnique {
        field: Option<String>,
        message: String,
    },

    #[error("Referenced record does not exist")]
    ForeignKeyViolation { field: Option<String> },

    #[error("Candidate not found")]
    NotFoundOrForbidden,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::FieldInvalid(_)
            | Error::MalformedBody(_)
            | Error::NoFieldsProvided
            | Error::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
            Error::DuplicateUnique { .. } => StatusCode::CONFLICT,
            Error::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            Error::AuthRequired | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::FieldInvalid(_) => "validation_failed",
            Error::MalformedBody(_) => "malformed_body",
            Error::NoFieldsProvided => "no_fields_provided",
            Error::DuplicateUnique { .. } => "duplicate",
            Error::ForeignKeyViolation { .. } => "foreign_key_violation",
            Error::NotFoundOrForbidden => "not_found",
            Error::AuthRequired => "unauthorized",
            Error::InvalidCredentials => "invalid_credentials",
            Error::RateLimited => "rate_limited",
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => {
                "server_error"
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let code = self.code();

        let body = match &self {
            Error::FieldInvalid(issues) => json!({
                "error": code,
                "message": "Validation failed",
                "issues": issues,
            }),
            Error::DuplicateUnique { field, message } => json!({
                "error": code,
                "message": message,
                "field": field,
            }),
            Error::ForeignKeyViolation { field } => json!({
                "error": code,
                "message": self.to_string(),
                "field": field,
            }),
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "request failed with server error");
                let message = if crate::config::is_development() {
                    self.to_string()
                } else {
                    "An unexpected error occurred".to_string()
                };
                json!({ "error": code, "message": message })
            }
            _ => json!({ "error": code, "message": self.to_string() }),
        };

        if matches!(self, Error::AuthRequired) {
            let jar = CookieJar::new().add(expired_session_cookie());
            return (status, jar, Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(mapped) = classify_constraint(db_err.code().as_deref(), db_err.constraint())
            {
                return mapped;
            }
        }
        Error::Database(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::MalformedBody(rejection.body_text())
    }
}

/// Known constraints and the request field each one guards.
const CONSTRAINT_FIELDS: &[(&str, &str, &str)] = &[
    (
        "users_email_key",
        "email",
        "An account with this email already exists",
    ),
    (
        "users_username_key",
        "username",
        "This username is already taken",
    ),
    (
        "candidates_recruiter_id_email_key",
        "email",
        "A candidate with this email already exists",
    ),
    (
        "candidates_recruiter_id_fkey",
        "recruiter_id",
        "Recruiter account does not exist",
    ),
];

/// Rewrites a store-level constraint violation into the error taxonomy.
/// Returns `None` for anything that is not a recognised violation code.
pub fn classify_constraint(code: Option<&str>, constraint: Option<&str>) -> Option<Error> {
    let known = constraint.and_then(|name| CONSTRAINT_FIELDS.iter().find(|(c, _, _)| *c == name));

    match code? {
        UNIQUE_VIOLATION => Some(match known {
            Some((_, field, message)) => Error::DuplicateUnique {
                field: Some(field.to_string()),
                message: message.to_string(),
            },
            None => Error::DuplicateUnique {
                field: None,
                message: "A record with these values already exists".to_string(),
            },
        }),
        FOREIGN_KEY_VIOLATION => Some(Error::ForeignKeyViolation {
            field: known.map(|(_, field, _)| field.to_string()),
        }),
        _ => None,
    }
}
