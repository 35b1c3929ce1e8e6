pub mod auth_service;
pub mod candidate_query;
pub mod candidate_service;
