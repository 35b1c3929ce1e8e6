//! Single-field parsers. Each takes the raw JSON value of one field (or
//! `None` when the key is absent) and either normalizes it or reports a
//! [`FieldIssue`] tagged with the field name.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use super::issues::{FieldIssue, IssueCode};
use crate::models::candidate::Choice;
use crate::utils::time::parse_iso8601;

pub type Raw<'a> = Option<&'a Value>;

pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 100;
pub const POSITION_MAX: usize = 100;
pub const LONG_TEXT_MAX: usize = 1000;
pub const URL_MAX: usize = 500;
pub const EXPERIENCE_MAX: i64 = 50;
pub const SALARY_MAX: i64 = 100_000_000;

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z '\-]+$").expect("valid name regex"))
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\+91[\-\s]?)?[6-9]\d{9}$").expect("valid phone regex"))
}

fn linkedin_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https?://([a-z]{2,3}\.)?linkedin\.com/.+$").expect("valid linkedin regex")
    })
}

pub fn username_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("valid username regex"))
}

/// The trimmed string behind `raw`, or `None` when nothing usable was sent.
/// Absent keys, `null` and blank strings all count as "not provided".
fn provided<'a>(field: &str, raw: Raw<'a>) -> Result<Option<&'a str>, FieldIssue> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then_some(trimmed))
        }
        Some(_) => Err(FieldIssue::new(
            field,
            IssueCode::InvalidType,
            format!("{} must be a string", field),
        )),
    }
}

fn required<'a>(field: &str, raw: Raw<'a>) -> Result<&'a str, FieldIssue> {
    provided(field, raw)?
        .ok_or_else(|| FieldIssue::new(field, IssueCode::Required, format!("{} is required", field)))
}

fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), FieldIssue> {
    if value.chars().count() > max {
        return Err(FieldIssue::new(
            field,
            IssueCode::TooLong,
            format!("{} must be at most {} characters", field, max),
        ));
    }
    Ok(())
}

pub fn person_name(field: &str, raw: Raw) -> Result<String, FieldIssue> {
    let value = required(field, raw)?;
    check_max_len(field, value, NAME_MAX)?;
    if !name_pattern().is_match(value) {
        return Err(FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            format!(
                "{} may only contain letters, spaces, hyphens and apostrophes",
                field
            ),
        ));
    }
    Ok(value.to_string())
}

pub fn email(field: &str, raw: Raw) -> Result<String, FieldIssue> {
    let value = required(field, raw)?.to_lowercase();
    check_max_len(field, &value, EMAIL_MAX)?;
    if !value.validate_email() {
        return Err(FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            "Invalid email address",
        ));
    }
    Ok(value)
}

pub fn required_text(field: &str, raw: Raw, max: usize) -> Result<String, FieldIssue> {
    let value = required(field, raw)?;
    check_max_len(field, value, max)?;
    Ok(value.to_string())
}

pub fn optional_text(field: &str, raw: Raw, max: usize) -> Result<Option<String>, FieldIssue> {
    let Some(value) = provided(field, raw)? else {
        return Ok(None);
    };
    check_max_len(field, value, max)?;
    Ok(Some(value.to_string()))
}

pub fn optional_phone(field: &str, raw: Raw) -> Result<Option<String>, FieldIssue> {
    let Some(value) = provided(field, raw)? else {
        return Ok(None);
    };
    if !phone_pattern().is_match(value) {
        return Err(FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            "Invalid phone number",
        ));
    }
    Ok(Some(value.to_string()))
}

pub fn optional_url(field: &str, raw: Raw) -> Result<Option<String>, FieldIssue> {
    let Some(value) = provided(field, raw)? else {
        return Ok(None);
    };
    check_max_len(field, value, URL_MAX)?;
    if !value.validate_url() {
        return Err(FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            format!("{} must be a valid URL", field),
        ));
    }
    Ok(Some(value.to_string()))
}

pub fn optional_linkedin_url(field: &str, raw: Raw) -> Result<Option<String>, FieldIssue> {
    let Some(value) = optional_url(field, raw)? else {
        return Ok(None);
    };
    if !linkedin_pattern().is_match(&value.to_lowercase()) {
        return Err(FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            format!("{} must be a linkedin.com URL", field),
        ));
    }
    Ok(Some(value))
}

/// Integers may arrive as JSON numbers or as numeric strings (query params).
pub fn optional_int(field: &str, raw: Raw, min: i64, max: i64) -> Result<Option<i64>, FieldIssue> {
    let not_integer = || {
        FieldIssue::new(
            field,
            IssueCode::InvalidType,
            format!("{} must be a whole number", field),
        )
    };
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(not_integer)?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| not_integer())?,
        Some(_) => return Err(not_integer()),
    };
    check_range(field, value, min, max)?;
    Ok(Some(value))
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<(), FieldIssue> {
    if value < min {
        return Err(FieldIssue::new(
            field,
            IssueCode::TooSmall,
            format!("{} must be at least {}", field, min),
        ));
    }
    if value > max {
        return Err(FieldIssue::new(
            field,
            IssueCode::TooBig,
            format!("{} must be at most {}", field, max),
        ));
    }
    Ok(())
}

pub fn optional_decimal(
    field: &str,
    raw: Raw,
    min: Decimal,
    max: Decimal,
) -> Result<Option<Decimal>, FieldIssue> {
    let not_number = || {
        FieldIssue::new(
            field,
            IssueCode::InvalidType,
            format!("{} must be a number", field),
        )
    };
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|_| not_number())?
        }
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).map_err(|_| not_number())?,
        Some(_) => return Err(not_number()),
    };
    check_range(field, value, min, max)?;
    Ok(Some(value))
}

pub fn optional_datetime(field: &str, raw: Raw) -> Result<Option<DateTime<Utc>>, FieldIssue> {
    let Some(value) = provided(field, raw)? else {
        return Ok(None);
    };
    parse_iso8601(value).map(Some).map_err(|_| {
        FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            format!("{} must be an ISO-8601 date-time", field),
        )
    })
}

pub fn optional_choice<E: Choice>(field: &str, raw: Raw) -> Result<Option<E>, FieldIssue> {
    let Some(value) = provided(field, raw)? else {
        return Ok(None);
    };
    E::parse(value).map(Some).ok_or_else(|| invalid_choice::<E>(field, value))
}

/// Missing enum values fall back to their default; present ones must match.
pub fn choice_or_default<E: Choice + Default>(field: &str, raw: Raw) -> Result<E, FieldIssue> {
    Ok(optional_choice(field, raw)?.unwrap_or_default())
}

/// A present enum value that may not be cleared.
pub fn required_choice<E: Choice>(field: &str, raw: Raw) -> Result<E, FieldIssue> {
    let value = match provided(field, raw)? {
        Some(value) => value,
        None => return Err(invalid_choice::<E>(field, "")),
    };
    E::parse(value).ok_or_else(|| invalid_choice::<E>(field, value))
}

/// For parameters that only shape the query: unknown values fall back to the
/// default instead of failing the request.
pub fn lenient_choice<E: Choice + Default>(raw: Raw) -> E {
    match raw {
        Some(Value::String(s)) => E::parse(&s.trim().to_ascii_lowercase()).unwrap_or_default(),
        _ => E::default(),
    }
}

fn invalid_choice<E: Choice>(field: &str, received: &str) -> FieldIssue {
    FieldIssue::new(
        field,
        IssueCode::InvalidEnum,
        format!(
            "{} must be one of: {} (received '{}')",
            field,
            E::allowed(),
            received
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{CandidateStatus, Priority};
    use serde_json::json;

    #[test]
    fn names_are_trimmed_and_restricted() {
        let v = json!("  Mary-Jane O'Neil ");
        assert_eq!(person_name("name", Some(&v)).unwrap(), "Mary-Jane O'Neil");

        let digits = json!("R2D2");
        let issue = person_name("name", Some(&digits)).unwrap_err();
        assert_eq!(issue.code, IssueCode::InvalidFormat);
        assert_eq!(issue.field, "name");

        let long = json!("a".repeat(101));
        assert_eq!(person_name("name", Some(&long)).unwrap_err().code, IssueCode::TooLong);
    }

    #[test]
    fn names_reject_tabs_and_line_breaks() {
        for raw in ["Jane\nDoe", "Jane\tDoe", "Jane\r\nDoe"] {
            let v = json!(raw);
            assert_eq!(
                person_name("name", Some(&v)).unwrap_err().code,
                IssueCode::InvalidFormat
            );
        }
    }

    #[test]
    fn missing_required_field_is_reported_as_required() {
        let issue = person_name("name", None).unwrap_err();
        assert_eq!(issue.code, IssueCode::Required);
        let blank = json!("   ");
        assert_eq!(required_text("position", Some(&blank), 100).unwrap_err().code, IssueCode::Required);
    }

    #[test]
    fn emails_are_case_folded() {
        let v = json!(" Foo@Bar.COM ");
        assert_eq!(email("email", Some(&v)).unwrap(), "foo@bar.com");
        let bad = json!("not-an-email");
        assert_eq!(email("email", Some(&bad)).unwrap_err().code, IssueCode::InvalidFormat);
    }

    #[test]
    fn empty_phone_is_absent_not_empty() {
        let empty = json!("");
        assert_eq!(optional_phone("phone", Some(&empty)).unwrap(), None);
        let ok = json!("9876543210");
        assert_eq!(optional_phone("phone", Some(&ok)).unwrap().as_deref(), Some("9876543210"));
        let prefixed = json!("+91 9876543210");
        assert!(optional_phone("phone", Some(&prefixed)).unwrap().is_some());
        let bad = json!("12345");
        assert!(optional_phone("phone", Some(&bad)).is_err());
    }

    #[test]
    fn numeric_strings_are_coerced_before_range_checks() {
        let s = json!("7");
        assert_eq!(optional_int("experience_years", Some(&s), 0, 50).unwrap(), Some(7));
        let too_big = json!(51);
        assert_eq!(
            optional_int("experience_years", Some(&too_big), 0, 50).unwrap_err().code,
            IssueCode::TooBig
        );
        let frac = json!(2.5);
        assert_eq!(
            optional_int("experience_years", Some(&frac), 0, 50).unwrap_err().code,
            IssueCode::InvalidType
        );
        let negative = json!("-1");
        assert_eq!(
            optional_int("experience_years", Some(&negative), 0, 50).unwrap_err().code,
            IssueCode::TooSmall
        );
    }

    #[test]
    fn salary_accepts_numbers_and_strings() {
        let max = Decimal::from(SALARY_MAX);
        let n = json!(85000.5);
        assert_eq!(
            optional_decimal("expected_salary", Some(&n), Decimal::ZERO, max).unwrap(),
            Some(Decimal::from_str("85000.5").unwrap())
        );
        let neg = json!("-10");
        assert!(optional_decimal("expected_salary", Some(&neg), Decimal::ZERO, max).is_err());
    }

    #[test]
    fn enum_message_lists_permitted_values() {
        let v = json!("ghosted");
        let issue = optional_choice::<CandidateStatus>("status", Some(&v)).unwrap_err();
        assert_eq!(issue.code, IssueCode::InvalidEnum);
        assert_eq!(
            issue.message,
            "status must be one of: applied, screening, interview, offer, hired, rejected, withdrawn (received 'ghosted')"
        );
    }

    #[test]
    fn enum_defaults_only_when_omitted() {
        assert_eq!(choice_or_default::<Priority>("priority", None).unwrap(), Priority::Medium);
        let bad = json!("critical");
        assert!(choice_or_default::<Priority>("priority", Some(&bad)).is_err());
    }

    #[test]
    fn lenient_choice_falls_back_silently() {
        let bad = json!("illegal_column");
        assert_eq!(lenient_choice::<Priority>(Some(&bad)), Priority::Medium);
        let ok = json!("urgent");
        assert_eq!(lenient_choice::<Priority>(Some(&ok)), Priority::Urgent);
        assert_eq!(lenient_choice::<Priority>(None), Priority::Medium);
    }

    #[test]
    fn lenient_choice_ignores_case() {
        let shouted = json!(" URGENT ");
        assert_eq!(lenient_choice::<Priority>(Some(&shouted)), Priority::Urgent);
        let mixed = json!("Low");
        assert_eq!(lenient_choice::<Priority>(Some(&mixed)), Priority::Low);
    }

    #[test]
    fn linkedin_urls_must_point_at_linkedin() {
        let ok = json!("https://www.linkedin.com/in/jane-doe");
        assert!(optional_linkedin_url("linkedin_url", Some(&ok)).unwrap().is_some());
        let other = json!("https://example.com/in/jane");
        assert!(optional_linkedin_url("linkedin_url", Some(&other)).is_err());
        let not_url = json!("linkedin");
        assert!(optional_url("resume_url", Some(&not_url)).is_err());
    }

    #[test]
    fn datetimes_parse_iso8601() {
        let v = json!("2025-06-01T09:00:00Z");
        assert!(optional_datetime("availability_date", Some(&v)).unwrap().is_some());
        let bad = json!("June first");
        assert_eq!(
            optional_datetime("availability_date", Some(&bad)).unwrap_err().code,
            IssueCode::InvalidFormat
        );
    }

    #[test]
    fn non_strings_are_type_errors() {
        let v = json!(42);
        assert_eq!(person_name("name", Some(&v)).unwrap_err().code, IssueCode::InvalidType);
    }
}
