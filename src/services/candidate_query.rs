//! SQL text for candidate statements. Every user-supplied value travels as a
//! bound `$n` argument; only the closed [`SortColumn`] set and the ASC/DESC
//! token are written into the statement text.

use uuid::Uuid;

use crate::database::query::SqlArg;
use crate::dto::candidate_dto::{
    CandidateChange, CandidatePatch, CandidateSearch, NewCandidate, SortField, SortOrder,
};
use crate::models::candidate::{Choice, CANDIDATE_COLUMNS};

/// Columns the list endpoint may sort by (the indexed ones).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Position,
    Status,
    CreatedAt,
}

impl SortColumn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Position => "position",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
        }
    }
}

impl From<SortField> for SortColumn {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Name => Self::Name,
            SortField::Position => Self::Position,
            SortField::Status => Self::Status,
            SortField::CreatedAt | SortField::Email | SortField::UpdatedAt => Self::CreatedAt,
        }
    }
}

fn direction_sql(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

pub fn offset_for(page: i64, limit: i64) -> i64 {
    (page.saturating_sub(1)).saturating_mul(limit).max(0)
}

/// The filter shared by the page and count statements of one list request.
#[derive(Debug, Clone)]
pub struct CandidateListQuery {
    conditions: Vec<String>,
    args: Vec<SqlArg>,
    sort: SortColumn,
    order: SortOrder,
    limit: i64,
    offset: i64,
}

impl CandidateListQuery {
    pub fn build(recruiter_id: Uuid, search: &CandidateSearch) -> Self {
        let mut query = Self {
            conditions: Vec::new(),
            args: Vec::new(),
            sort: SortColumn::from(search.sort_by),
            order: search.sort_order,
            limit: search.limit,
            offset: offset_for(search.page, search.limit),
        };

        query.push("recruiter_id = $", SqlArg::Uuid(recruiter_id));

        if let Some(status) = search.status {
            query.push("status = $", text(status.as_str()));
        }
        if let Some(priority) = search.priority {
            query.push("priority = $", text(priority.as_str()));
        }
        if let Some(source) = search.source {
            query.push("source = $", text(source.as_str()));
        }
        if let Some(name) = &search.name {
            query.push("LOWER(name) LIKE $", contains(name));
        }
        if let Some(position) = &search.position {
            query.push("LOWER(position) LIKE $", contains(position));
        }
        if let Some(min) = search.min_experience {
            query.push("experience_years >= $", SqlArg::Int(Some(min)));
        }
        if let Some(max) = search.max_experience {
            query.push("experience_years <= $", SqlArg::Int(Some(max)));
        }
        if let Some(after) = search.created_after {
            query.push("created_at >= $", SqlArg::Timestamp(Some(after)));
        }
        if let Some(before) = search.created_before {
            query.push("created_at <= $", SqlArg::Timestamp(Some(before)));
        }

        query
    }

    fn push(&mut self, condition: &str, arg: SqlArg) {
        self.args.push(arg);
        self.conditions
            .push(format!("{}{}", condition, self.args.len()));
    }

    fn where_clause(&self) -> String {
        format!("WHERE {}", self.conditions.join(" AND "))
    }

    /// `id` breaks ties so LIMIT/OFFSET windows never overlap or skip rows.
    pub fn page_sql(&self) -> String {
        format!(
            "SELECT {} FROM candidates {} ORDER BY {} {dir}, id {dir} LIMIT ${} OFFSET ${}",
            CANDIDATE_COLUMNS,
            self.where_clause(),
            self.sort.as_sql(),
            self.args.len() + 1,
            self.args.len() + 2,
            dir = direction_sql(self.order)
        )
    }

    pub fn page_args(&self) -> Vec<SqlArg> {
        let mut args = self.args.clone();
        args.push(SqlArg::BigInt(self.limit));
        args.push(SqlArg::BigInt(self.offset));
        args
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM candidates {}", self.where_clause())
    }

    pub fn count_args(&self) -> &[SqlArg] {
        &self.args
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

fn text(value: &str) -> SqlArg {
    SqlArg::Text(Some(value.to_string()))
}

fn contains(value: &str) -> SqlArg {
    SqlArg::Text(Some(format!("%{}%", value.to_lowercase())))
}

pub fn insert_candidate(recruiter_id: Uuid, candidate: NewCandidate) -> (String, Vec<SqlArg>) {
    let sql = format!(
        "INSERT INTO candidates (
            recruiter_id, name, email, phone, position, skills, experience_years,
            status, priority, notes, resume_url, linkedin_url, portfolio_url,
            expected_salary, availability_date, source
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7,
            $8, $9, $10, $11, $12, $13,
            $14, $15, $16
        )
        RETURNING {}",
        CANDIDATE_COLUMNS
    );
    let args = vec![
        SqlArg::Uuid(recruiter_id),
        SqlArg::Text(Some(candidate.name)),
        SqlArg::Text(Some(candidate.email)),
        SqlArg::Text(candidate.phone),
        SqlArg::Text(Some(candidate.position)),
        SqlArg::Text(candidate.skills),
        SqlArg::Int(candidate.experience_years),
        text(candidate.status.as_str()),
        text(candidate.priority.as_str()),
        SqlArg::Text(candidate.notes),
        SqlArg::Text(candidate.resume_url),
        SqlArg::Text(candidate.linkedin_url),
        SqlArg::Text(candidate.portfolio_url),
        SqlArg::Decimal(candidate.expected_salary),
        SqlArg::Timestamp(candidate.availability_date),
        text(candidate.source.as_str()),
    ];
    (sql, args)
}

fn change_arg(change: CandidateChange) -> SqlArg {
    match change {
        CandidateChange::Name(v) | CandidateChange::Email(v) | CandidateChange::Position(v) => {
            SqlArg::Text(Some(v))
        }
        CandidateChange::Phone(v)
        | CandidateChange::Skills(v)
        | CandidateChange::Notes(v)
        | CandidateChange::ResumeUrl(v)
        | CandidateChange::LinkedinUrl(v)
        | CandidateChange::PortfolioUrl(v) => SqlArg::Text(v),
        CandidateChange::ExperienceYears(v) => SqlArg::Int(v),
        CandidateChange::Status(v) => text(v.as_str()),
        CandidateChange::Priority(v) => text(v.as_str()),
        CandidateChange::Source(v) => text(v.as_str()),
        CandidateChange::ExpectedSalary(v) => SqlArg::Decimal(v),
        CandidateChange::AvailabilityDate(v) => SqlArg::Timestamp(v),
    }
}

/// `UPDATE ... SET` over exactly the patched columns, scoped to the owner.
pub fn update_candidate(
    recruiter_id: Uuid,
    candidate_id: Uuid,
    patch: CandidatePatch,
) -> (String, Vec<SqlArg>) {
    let mut assignments = Vec::new();
    let mut args = Vec::new();

    for change in patch.into_changes() {
        let column = change.column();
        args.push(change_arg(change));
        assignments.push(format!("{} = ${}", column, args.len()));
    }
    assignments.push("updated_at = NOW()".to_string());

    let id_idx = args.len() + 1;
    let owner_idx = args.len() + 2;
    args.push(SqlArg::Uuid(candidate_id));
    args.push(SqlArg::Uuid(recruiter_id));

    let sql = format!(
        "UPDATE candidates SET {} WHERE id = ${} AND recruiter_id = ${} RETURNING {}",
        assignments.join(", "),
        id_idx,
        owner_idx,
        CANDIDATE_COLUMNS
    );
    (sql, args)
}
