use validator::Validate;

use super::fields::username_pattern;
use super::issues::{FieldIssue, IssueCode, Issues};
use crate::dto::auth_dto::{ChangePasswordPayload, LoginPayload, RegisterPayload};
use crate::error::Result;

fn check_strength(issues: &mut Issues, field: &str, password: &str) {
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !password.is_empty() && !(has_letter && has_digit) {
        issues.push(FieldIssue::new(
            field,
            IssueCode::InvalidFormat,
            format!("{} must contain at least one letter and one digit", field),
        ));
    }
}

fn check_confirmation(issues: &mut Issues, password: &str, confirmation: &str) {
    if password != confirmation {
        issues.push(FieldIssue::new(
            "confirmPassword",
            IssueCode::Mismatch,
            "Passwords do not match",
        ));
    }
}

/// Expects a payload already passed through [`RegisterPayload::normalized`].
pub fn check_register(payload: &RegisterPayload) -> Result<()> {
    let mut issues = Issues::new();
    if let Err(errors) = payload.validate() {
        issues.extend_from_validator(&errors);
    }
    if !payload.username.is_empty() && !username_pattern().is_match(&payload.username) {
        issues.push(FieldIssue::new(
            "username",
            IssueCode::InvalidFormat,
            "username may only contain letters, digits, hyphens and underscores",
        ));
    }
    check_strength(&mut issues, "password", &payload.password);
    check_confirmation(&mut issues, &payload.password, &payload.confirm_password);
    issues.finish()
}

pub fn check_login(payload: &LoginPayload) -> Result<()> {
    let mut issues = Issues::new();
    if let Err(errors) = payload.validate() {
        issues.extend_from_validator(&errors);
    }
    issues.finish()
}

pub fn check_change_password(payload: &ChangePasswordPayload) -> Result<()> {
    let mut issues = Issues::new();
    if let Err(errors) = payload.validate() {
        issues.extend_from_validator(&errors);
    }
    check_strength(&mut issues, "new_password", &payload.new_password);
    check_confirmation(&mut issues, &payload.new_password, &payload.confirm_password);
    issues.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn valid() -> RegisterPayload {
        RegisterPayload {
            username: "jane_doe".into(),
            full_name: Some("Jane Doe".into()),
            email: "jane@example.com".into(),
            password: "s3cretpass".into(),
            confirm_password: "s3cretpass".into(),
        }
    }

    fn fields(err: Error) -> Vec<String> {
        match err {
            Error::FieldInvalid(issues) => issues.into_iter().map(|i| i.field).collect(),
            other => panic!("expected FieldInvalid, got {:?}", other),
        }
    }

    #[test]
    fn accepts_a_well_formed_registration() {
        assert!(check_register(&valid()).is_ok());
    }

    #[test]
    fn registration_errors_are_collected() {
        let payload = RegisterPayload {
            username: "a!".into(),
            email: "nope".into(),
            password: "short".into(),
            confirm_password: "different".into(),
            ..valid()
        };
        let mut got = fields(check_register(&payload).unwrap_err());
        got.sort();
        assert_eq!(
            got,
            vec!["confirmPassword", "email", "password", "password", "username", "username"]
        );
    }

    #[test]
    fn normalization_lowercases_email_and_drops_blank_full_name() {
        let payload = RegisterPayload {
            email: "  Jane@Example.COM ".into(),
            full_name: Some("   ".into()),
            ..valid()
        }
        .normalized();
        assert_eq!(payload.email, "jane@example.com");
        assert_eq!(payload.full_name, None);
    }

    #[test]
    fn login_requires_email_and_password() {
        let mut got = fields(check_login(&LoginPayload::default()).unwrap_err());
        got.sort();
        assert_eq!(got, vec!["email", "password"]);
    }

    #[test]
    fn password_change_requires_matching_confirmation() {
        let payload = ChangePasswordPayload {
            current_password: "old-pass1".into(),
            new_password: "n3w-password".into(),
            confirm_password: "n3w-passw0rd".into(),
        };
        assert_eq!(fields(check_change_password(&payload).unwrap_err()), vec!["confirmPassword"]);
    }
}
