pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod validation;

use crate::services::{auth_service::AuthService, candidate_service::CandidateService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub candidate_service: CandidateService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let auth_service = AuthService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());

        Self {
            pool,
            auth_service,
            candidate_service,
        }
    }
}
