use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A closed set of string values accepted for one field.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }

    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
    Withdrawn,
}

impl Choice for CandidateStatus {
    const ALL: &'static [Self] = &[
        Self::Applied,
        Self::Screening,
        Self::Interview,
        Self::Offer,
        Self::Hired,
        Self::Rejected,
        Self::Withdrawn,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Choice for Priority {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Urgent];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Website,
    Linkedin,
    Referral,
    JobBoard,
    Agency,
    Other,
}

impl Choice for Source {
    const ALL: &'static [Self] = &[
        Self::Website,
        Self::Linkedin,
        Self::Referral,
        Self::JobBoard,
        Self::Agency,
        Self::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Linkedin => "linkedin",
            Self::Referral => "referral",
            Self::JobBoard => "job_board",
            Self::Agency => "agency",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub skills: Option<String>,
    pub experience_years: Option<i32>,
    pub status: String,
    pub priority: String,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub expected_salary: Option<Decimal>,
    pub availability_date: Option<DateTime<Utc>>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column list shared by every statement that returns candidate rows.
pub const CANDIDATE_COLUMNS: &str = "id, recruiter_id, name, email, phone, position, skills, \
     experience_years, status, priority, notes, resume_url, linkedin_url, portfolio_url, \
     expected_salary, availability_date, source, created_at, updated_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_parse_is_exact() {
        assert_eq!(CandidateStatus::parse("hired"), Some(CandidateStatus::Hired));
        assert_eq!(CandidateStatus::parse("Hired"), None);
        assert_eq!(Source::parse("job_board"), Some(Source::JobBoard));
    }

    #[test]
    fn allowed_lists_every_value_in_order() {
        assert_eq!(Priority::allowed(), "low, medium, high, urgent");
        assert_eq!(
            CandidateStatus::allowed(),
            "applied, screening, interview, offer, hired, rejected, withdrawn"
        );
    }

    #[test]
    fn defaults_match_new_candidate_defaults() {
        assert_eq!(CandidateStatus::default().as_str(), "applied");
        assert_eq!(Priority::default().as_str(), "medium");
        assert_eq!(Source::default().as_str(), "website");
    }
}
