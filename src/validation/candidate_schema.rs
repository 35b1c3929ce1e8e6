//! Request shapes for candidates, composed from the single-field parsers.
//! Every shape checks all of its fields and reports every failure at once.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::fields::{self, EXPERIENCE_MAX, LONG_TEXT_MAX, NAME_MAX, POSITION_MAX, SALARY_MAX};
use super::issues::{FieldIssue, IssueCode, Issues};
use crate::dto::candidate_dto::{
    CandidateChange, CandidatePatch, CandidateSearch, NewCandidate, SortField, SortOrder,
    DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT,
};
use crate::error::{Error, Result};
use crate::models::candidate::{CandidateStatus, Priority, Source};

fn experience(field: &str, raw: fields::Raw) -> std::result::Result<Option<i32>, FieldIssue> {
    Ok(fields::optional_int(field, raw, 0, EXPERIENCE_MAX)?.map(|v| v as i32))
}

fn salary(field: &str, raw: fields::Raw) -> std::result::Result<Option<Decimal>, FieldIssue> {
    fields::optional_decimal(field, raw, Decimal::ZERO, Decimal::from(SALARY_MAX))
}

pub fn parse_create(body: &Map<String, Value>) -> Result<NewCandidate> {
    let mut issues = Issues::new();

    let name = issues.check(fields::person_name("name", body.get("name")));
    let email = issues.check(fields::email("email", body.get("email")));
    let phone = issues.check(fields::optional_phone("phone", body.get("phone")));
    let position = issues.check(fields::required_text(
        "position",
        body.get("position"),
        POSITION_MAX,
    ));
    let skills = issues.check(fields::optional_text(
        "skills",
        body.get("skills"),
        LONG_TEXT_MAX,
    ));
    let experience_years = issues.check(experience("experience_years", body.get("experience_years")));
    let status = issues.check(fields::choice_or_default::<CandidateStatus>(
        "status",
        body.get("status"),
    ));
    let priority = issues.check(fields::choice_or_default::<Priority>(
        "priority",
        body.get("priority"),
    ));
    let notes = issues.check(fields::optional_text(
        "notes",
        body.get("notes"),
        LONG_TEXT_MAX,
    ));
    let resume_url = issues.check(fields::optional_url("resume_url", body.get("resume_url")));
    let linkedin_url = issues.check(fields::optional_linkedin_url(
        "linkedin_url",
        body.get("linkedin_url"),
    ));
    let portfolio_url = issues.check(fields::optional_url(
        "portfolio_url",
        body.get("portfolio_url"),
    ));
    let expected_salary = issues.check(salary("expected_salary", body.get("expected_salary")));
    let availability_date = issues.check(fields::optional_datetime(
        "availability_date",
        body.get("availability_date"),
    ));
    let source = issues.check(fields::choice_or_default::<Source>("source", body.get("source")));

    let (
        Some(name),
        Some(email),
        Some(phone),
        Some(position),
        Some(skills),
        Some(experience_years),
        Some(status),
        Some(priority),
        Some(notes),
        Some(resume_url),
        Some(linkedin_url),
        Some(portfolio_url),
        Some(expected_salary),
        Some(availability_date),
        Some(source),
    ) = (
        name,
        email,
        phone,
        position,
        skills,
        experience_years,
        status,
        priority,
        notes,
        resume_url,
        linkedin_url,
        portfolio_url,
        expected_salary,
        availability_date,
        source,
    )
    else {
        return Err(Error::FieldInvalid(issues.into_vec()));
    };

    Ok(NewCandidate {
        name,
        email,
        phone,
        position,
        skills,
        experience_years,
        status,
        priority,
        notes,
        resume_url,
        linkedin_url,
        portfolio_url,
        expected_salary,
        availability_date,
        source,
    })
}

/// Keys that are not mutable candidate columns (including `id` and
/// `recruiter_id`) are ignored. A present-but-blank optional value clears it.
pub fn parse_update(body: &Map<String, Value>) -> Result<CandidatePatch> {
    let mut issues = Issues::new();
    let mut changes = Vec::new();

    for (key, raw) in body {
        let raw = Some(raw);
        let field = key.as_str();
        let change = match field {
            "name" => issues.check(fields::person_name(field, raw)).map(CandidateChange::Name),
            "email" => issues.check(fields::email(field, raw)).map(CandidateChange::Email),
            "phone" => issues.check(fields::optional_phone(field, raw)).map(CandidateChange::Phone),
            "position" => issues
                .check(fields::required_text(field, raw, POSITION_MAX))
                .map(CandidateChange::Position),
            "skills" => issues
                .check(fields::optional_text(field, raw, LONG_TEXT_MAX))
                .map(CandidateChange::Skills),
            "experience_years" => issues
                .check(experience(field, raw))
                .map(CandidateChange::ExperienceYears),
            "status" => issues
                .check(fields::required_choice::<CandidateStatus>(field, raw))
                .map(CandidateChange::Status),
            "priority" => issues
                .check(fields::required_choice::<Priority>(field, raw))
                .map(CandidateChange::Priority),
            "notes" => issues
                .check(fields::optional_text(field, raw, LONG_TEXT_MAX))
                .map(CandidateChange::Notes),
            "resume_url" => issues
                .check(fields::optional_url(field, raw))
                .map(CandidateChange::ResumeUrl),
            "linkedin_url" => issues
                .check(fields::optional_linkedin_url(field, raw))
                .map(CandidateChange::LinkedinUrl),
            "portfolio_url" => issues
                .check(fields::optional_url(field, raw))
                .map(CandidateChange::PortfolioUrl),
            "expected_salary" => issues
                .check(salary(field, raw))
                .map(CandidateChange::ExpectedSalary),
            "availability_date" => issues
                .check(fields::optional_datetime(field, raw))
                .map(CandidateChange::AvailabilityDate),
            "source" => issues
                .check(fields::required_choice::<Source>(field, raw))
                .map(CandidateChange::Source),
            _ => None,
        };
        if let Some(change) = change {
            changes.push(change);
        }
    }

    issues.finish()?;
    CandidatePatch::new(changes).ok_or(Error::NoFieldsProvided)
}

/// Query strings arrive as flat string maps.
pub fn query_to_map(query: HashMap<String, String>) -> Map<String, Value> {
    query
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

pub fn parse_search(params: &Map<String, Value>) -> Result<CandidateSearch> {
    let mut issues = Issues::new();

    let page = issues
        .check(fields::optional_int("page", params.get("page"), 1, i32::MAX as i64))
        .map(|v| v.unwrap_or(DEFAULT_PAGE));
    let limit = issues
        .check(fields::optional_int("limit", params.get("limit"), 1, MAX_LIMIT))
        .map(|v| v.unwrap_or(DEFAULT_LIMIT));
    let sort_by = fields::lenient_choice::<SortField>(params.get("sort_by"));
    let sort_order = fields::lenient_choice::<SortOrder>(params.get("sort_order"));
    let status = issues.check(fields::optional_choice::<CandidateStatus>(
        "status",
        params.get("status"),
    ));
    let priority = issues.check(fields::optional_choice::<Priority>(
        "priority",
        params.get("priority"),
    ));
    let source = issues.check(fields::optional_choice::<Source>("source", params.get("source")));
    let name = issues.check(fields::optional_text("name", params.get("name"), NAME_MAX));
    let position = issues.check(fields::optional_text(
        "position",
        params.get("position"),
        POSITION_MAX,
    ));
    let min_experience = issues.check(experience("min_experience", params.get("min_experience")));
    let max_experience = issues.check(experience("max_experience", params.get("max_experience")));
    let created_after = issues.check(fields::optional_datetime(
        "created_after",
        params.get("created_after"),
    ));
    let created_before = issues.check(fields::optional_datetime(
        "created_before",
        params.get("created_before"),
    ));

    if let (Some(Some(min)), Some(Some(max))) = (min_experience, max_experience) {
        if min > max {
            issues.push(FieldIssue::new(
                "min_experience",
                IssueCode::TooBig,
                "min_experience must not exceed max_experience",
            ));
        }
    }
    if let (Some(Some(after)), Some(Some(before))) = (created_after, created_before) {
        if after > before {
            issues.push(FieldIssue::new(
                "created_after",
                IssueCode::TooBig,
                "created_after must be earlier than created_before",
            ));
        }
    }

    if !issues.is_empty() {
        return Err(Error::FieldInvalid(issues.into_vec()));
    }

    Ok(CandidateSearch {
        page: page.unwrap_or(DEFAULT_PAGE),
        limit: limit.unwrap_or(DEFAULT_LIMIT),
        sort_by,
        sort_order,
        status: status.flatten(),
        priority: priority.flatten(),
        source: source.flatten(),
        name: name.flatten(),
        position: position.flatten(),
        min_experience: min_experience.flatten(),
        max_experience: max_experience.flatten(),
        created_after: created_after.flatten(),
        created_before: created_before.flatten(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn issues_of(err: Error) -> Vec<FieldIssue> {
        match err {
            Error::FieldInvalid(issues) => issues,
            other => panic!("expected FieldInvalid, got {:?}", other),
        }
    }

    #[test]
    fn create_applies_documented_defaults() {
        let body = obj(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "position": "Engineer"
        }));
        let c = parse_create(&body).unwrap();
        assert_eq!(c.status, CandidateStatus::Applied);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.source, Source::Website);
        assert_eq!(c.phone, None);
    }

    #[test]
    fn create_normalizes_email_and_blank_phone() {
        let body = obj(json!({
            "name": " Jane Doe ",
            "email": "Foo@Bar.COM",
            "position": "Engineer",
            "phone": ""
        }));
        let c = parse_create(&body).unwrap();
        assert_eq!(c.name, "Jane Doe");
        assert_eq!(c.email, "foo@bar.com");
        assert_eq!(c.phone, None);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let issues = issues_of(parse_create(&Map::new()).unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "position"]);
        assert!(issues.iter().all(|i| i.code == IssueCode::Required));
    }

    #[test]
    fn create_accumulates_mixed_failures() {
        let body = obj(json!({
            "name": "Jane Doe",
            "email": "nope",
            "position": "Engineer",
            "status": "ghosted",
            "experience_years": "99",
            "linkedin_url": "https://example.com/jane"
        }));
        let issues = issues_of(parse_create(&body).unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "experience_years", "status", "linkedin_url"]);
    }

    #[test]
    fn create_coerces_numeric_strings() {
        let body = obj(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "position": "Engineer",
            "experience_years": "4",
            "expected_salary": "120000"
        }));
        let c = parse_create(&body).unwrap();
        assert_eq!(c.experience_years, Some(4));
        assert_eq!(c.expected_salary, Some(Decimal::from(120_000)));
    }

    #[test]
    fn update_with_no_known_keys_is_rejected() {
        assert!(matches!(parse_update(&Map::new()), Err(Error::NoFieldsProvided)));
        let only_ids = obj(json!({ "id": "abc", "recruiter_id": "def" }));
        assert!(matches!(parse_update(&only_ids), Err(Error::NoFieldsProvided)));
    }

    #[test]
    fn update_keeps_only_supplied_fields() {
        let body = obj(json!({ "status": "interview", "notes": "" }));
        let patch = parse_update(&body).unwrap();
        assert_eq!(patch.changes().len(), 2);
        assert!(patch.changes().contains(&CandidateChange::Notes(None)));
        assert!(patch
            .changes()
            .contains(&CandidateChange::Status(CandidateStatus::Interview)));
    }

    #[test]
    fn update_rejects_clearing_required_columns() {
        let body = obj(json!({ "name": "", "status": null }));
        let issues = issues_of(parse_update(&body).unwrap_err());
        let mut fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        fields.sort();
        assert_eq!(fields, vec!["name", "status"]);
    }

    #[test]
    fn update_reports_invalid_values_before_emptiness() {
        let body = obj(json!({ "priority": "critical" }));
        let issues = issues_of(parse_update(&body).unwrap_err());
        assert_eq!(issues[0].code, IssueCode::InvalidEnum);
        assert!(issues[0].message.contains("low, medium, high, urgent"));
    }

    #[test]
    fn search_defaults() {
        let s = parse_search(&Map::new()).unwrap();
        assert_eq!(s, CandidateSearch::default());
        assert_eq!((s.page, s.limit), (1, 10));
        assert_eq!(s.sort_by, SortField::CreatedAt);
        assert_eq!(s.sort_order, SortOrder::Desc);
    }

    #[test]
    fn search_coerces_query_strings() {
        let mut q = HashMap::new();
        q.insert("page".to_string(), "2".to_string());
        q.insert("limit".to_string(), "5".to_string());
        q.insert("sort_by".to_string(), "illegal_column".to_string());
        q.insert("sort_order".to_string(), "asc".to_string());
        q.insert("status".to_string(), "offer".to_string());
        q.insert("min_experience".to_string(), "3".to_string());
        let s = parse_search(&query_to_map(q)).unwrap();
        assert_eq!((s.page, s.limit), (2, 5));
        assert_eq!(s.sort_by, SortField::CreatedAt);
        assert_eq!(s.sort_order, SortOrder::Asc);
        assert_eq!(s.status, Some(CandidateStatus::Offer));
        assert_eq!(s.min_experience, Some(3));
    }

    #[test]
    fn search_sort_values_are_case_insensitive() {
        let params = obj(json!({ "sort_by": "Name", "sort_order": "ASC" }));
        let s = parse_search(&params).unwrap();
        assert_eq!(s.sort_by, SortField::Name);
        assert_eq!(s.sort_order, SortOrder::Asc);
    }

    #[test]
    fn search_rejects_out_of_range_paging() {
        let params = obj(json!({ "page": "0", "limit": "101", "status": "lost" }));
        let issues = issues_of(parse_search(&params).unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["page", "limit", "status"]);
    }

    #[test]
    fn search_checks_ranges_across_fields() {
        let params = obj(json!({
            "min_experience": "10",
            "max_experience": "2",
            "created_after": "2025-02-01",
            "created_before": "2025-01-01"
        }));
        let issues = issues_of(parse_search(&params).unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["min_experience", "created_after"]);
    }
}
