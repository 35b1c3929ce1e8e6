use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    dto::candidate_dto::{CandidateListResponse, DeleteResponse, StatusSummary},
    error::Result,
    models::candidate::Candidate,
    utils::token::Claims,
    validation::candidate_schema::{parse_create, parse_search, parse_update, query_to_map},
    AppState,
};

#[utoipa::path(
    get,
    path = "/candidates",
    params(
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, 1-100"),
        ("sort_by" = Option<String>, Query, description = "name, email, position, status, created_at or updated_at"),
        ("sort_order" = Option<String>, Query, description = "asc or desc"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("priority" = Option<String>, Query, description = "Filter by priority"),
        ("source" = Option<String>, Query, description = "Filter by source"),
        ("name" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("position" = Option<String>, Query, description = "Case-insensitive position substring"),
        ("min_experience" = Option<i32>, Query, description = "Minimum years of experience"),
        ("max_experience" = Option<i32>, Query, description = "Maximum years of experience"),
        ("created_after" = Option<String>, Query, description = "ISO-8601 lower bound on created_at"),
        ("created_before" = Option<String>, Query, description = "ISO-8601 upper bound on created_at")
    ),
    responses(
        (status = 200, description = "A page of the recruiter's candidates", body = Json<CandidateListResponse>),
        (status = 400, description = "Invalid query"),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse> {
    let search = parse_search(&query_to_map(query))?;
    let result = state.candidate_service.list(claims.sub, &search).await?;
    Ok(Json(CandidateListResponse {
        candidates: result.items,
        pagination: result.pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/candidates/summary",
    responses(
        (status = 200, description = "Candidate counts per status", body = Json<StatusSummary>),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn candidate_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let summary = state.candidate_service.status_summary(claims.sub).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/candidates",
    request_body = Candidate,
    responses(
        (status = 201, description = "Candidate created", body = Json<Candidate>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Candidate email already used"),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(body) = payload?;
    let candidate = parse_create(&body)?;
    let created = state.candidate_service.create(claims.sub, candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = Json<Candidate>),
        (status = 404, description = "Candidate not found"),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get(claims.sub, id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    put,
    path = "/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = Candidate,
    responses(
        (status = 200, description = "Candidate updated", body = Json<Candidate>),
        (status = 400, description = "Invalid payload or no fields provided"),
        (status = 404, description = "Candidate not found"),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(body) = payload?;
    let patch = parse_update(&body)?;
    let updated = state.candidate_service.update(claims.sub, id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate deleted", body = Json<DeleteResponse>),
        (status = 404, description = "Candidate not found"),
        (status = 401, description = "Not signed in")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.candidate_service.delete(claims.sub, id).await?;
    Ok(Json(DeleteResponse {
        message: "Candidate deleted successfully".to_string(),
    }))
}
