use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::candidate::{Candidate, CandidateStatus, Choice, Priority, Source};

/// A fully validated create request, defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub skills: Option<String>,
    pub experience_years: Option<i32>,
    pub status: CandidateStatus,
    pub priority: Priority,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub expected_salary: Option<Decimal>,
    pub availability_date: Option<DateTime<Utc>>,
    pub source: Source,
}

/// One column assignment of a partial update. Every mutable candidate
/// column has exactly one variant, so a patch can never name anything else.
/// `None` payloads clear the column.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateChange {
    Name(String),
    Email(String),
    Phone(Option<String>),
    Position(String),
    Skills(Option<String>),
    ExperienceYears(Option<i32>),
    Status(CandidateStatus),
    Priority(Priority),
    Notes(Option<String>),
    ResumeUrl(Option<String>),
    LinkedinUrl(Option<String>),
    PortfolioUrl(Option<String>),
    ExpectedSalary(Option<Decimal>),
    AvailabilityDate(Option<DateTime<Utc>>),
    Source(Source),
}

impl CandidateChange {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::Position(_) => "position",
            Self::Skills(_) => "skills",
            Self::ExperienceYears(_) => "experience_years",
            Self::Status(_) => "status",
            Self::Priority(_) => "priority",
            Self::Notes(_) => "notes",
            Self::ResumeUrl(_) => "resume_url",
            Self::LinkedinUrl(_) => "linkedin_url",
            Self::PortfolioUrl(_) => "portfolio_url",
            Self::ExpectedSalary(_) => "expected_salary",
            Self::AvailabilityDate(_) => "availability_date",
            Self::Source(_) => "source",
        }
    }
}

/// A non-empty set of column changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePatch {
    changes: Vec<CandidateChange>,
}

impl CandidatePatch {
    /// `None` when nothing would change.
    pub fn new(changes: Vec<CandidateChange>) -> Option<Self> {
        (!changes.is_empty()).then_some(Self { changes })
    }

    pub fn changes(&self) -> &[CandidateChange] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<CandidateChange> {
        self.changes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Email,
    Position,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl Choice for SortField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Email,
        Self::Position,
        Self::Status,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Position => "position",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl Choice for SortOrder {
    const ALL: &'static [Self] = &[Self::Asc, Self::Desc];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// A validated list/search request.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSearch {
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub status: Option<CandidateStatus>,
    pub priority: Option<Priority>,
    pub source: Option<Source>,
    pub name: Option<String>,
    pub position: Option<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl Default for CandidateSearch {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            status: None,
            priority: None,
            source: None,
            name: None,
            position: None,
            min_experience: None,
            max_experience: None,
            created_after: None,
            created_before: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        Self {
            page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<Candidate>,
    pub pagination: Pagination,
}

/// Candidate counts per status; every status is present, zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusSummary {
    pub total: i64,
    #[serde(flatten)]
    pub by_status: BTreeMap<String, i64>,
}

impl StatusSummary {
    pub fn from_counts(counts: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut by_status: BTreeMap<String, i64> = CandidateStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut total = 0;
        for (status, count) in counts {
            total += count;
            *by_status.entry(status).or_insert(0) += count;
        }
        Self { total, by_status }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_up() {
        let p = Pagination::new(3, 10, 25);
        assert_eq!(p.pages, 3);
        assert_eq!(Pagination::new(1, 10, 20).pages, 2);
        assert_eq!(Pagination::new(1, 10, 0).pages, 0);
        assert_eq!(Pagination::new(7, 5, 1).pages, 1);
    }

    #[test]
    fn summary_zero_fills_missing_statuses() {
        let summary = StatusSummary::from_counts(vec![
            ("applied".to_string(), 4),
            ("hired".to_string(), 1),
        ]);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.by_status["applied"], 4);
        assert_eq!(summary.by_status["withdrawn"], 0);
        assert_eq!(summary.by_status.len(), 7);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], 5);
        assert_eq!(json["hired"], 1);
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(CandidatePatch::new(Vec::new()).is_none());
        let patch = CandidatePatch::new(vec![CandidateChange::Notes(None)]).unwrap();
        assert_eq!(patch.changes()[0].column(), "notes");
    }
}
