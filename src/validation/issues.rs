use serde::Serialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    TooShort,
    TooLong,
    TooSmall,
    TooBig,
    InvalidFormat,
    InvalidEnum,
    Mismatch,
}

/// One failed field, as reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
    pub code: IssueCode,
}

impl FieldIssue {
    pub fn new(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            code,
        }
    }
}

/// Collects issues across every field of a request before failing.
#[derive(Debug, Default)]
pub struct Issues {
    items: Vec<FieldIssue>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error side of `result` and hands back the value, if any.
    pub fn check<T>(&mut self, result: Result<T, FieldIssue>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(issue) => {
                self.items.push(issue);
                None
            }
        }
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.items.push(issue);
    }

    pub fn extend_from_validator(&mut self, errors: &validator::ValidationErrors) {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, errs) in fields {
            for err in errs.iter() {
                let code = match err.code.as_ref() {
                    "email" => IssueCode::InvalidFormat,
                    "url" => IssueCode::InvalidFormat,
                    "length" => {
                        let len = err
                            .params
                            .get("value")
                            .and_then(|v| v.as_str())
                            .map(|s| s.chars().count() as u64);
                        let min = err.params.get("min").and_then(|v| v.as_u64());
                        match (len, min) {
                            (Some(len), Some(min)) if len < min => IssueCode::TooShort,
                            _ => IssueCode::TooLong,
                        }
                    }
                    "required" => IssueCode::Required,
                    _ => IssueCode::InvalidFormat,
                };
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                self.items.push(FieldIssue::new(&field.to_string(), code, message));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldIssue> {
        self.items
    }

    pub fn finish(self) -> Result<(), Error> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(Error::FieldInvalid(self.items))
        }
    }
}
