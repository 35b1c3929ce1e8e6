pub mod auth_schema;
pub mod candidate_schema;
pub mod fields;
pub mod issues;

pub use issues::{FieldIssue, IssueCode, Issues};
