//! Schema validation for user creation payloads.
//!
//! The validator accepts any JSON value and either returns a [`NewUser`] or
//! every field-level problem it found, in field order. It never panics.
//! Fields other than `name`, `email` and `role` are ignored.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::user::{NewUser, Role};

/// Minimum length of `name`, in characters.
pub const NAME_MIN_CHARS: usize = 2;

/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueCode {
    /// Missing value, or a value of the wrong JSON type.
    InvalidType,
    /// String shorter than the allowed minimum.
    TooSmall,
    /// String that does not match the required format.
    InvalidString,
    /// Value outside a closed set of choices.
    InvalidEnumValue,
}

/// One field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Issue {
    pub code: IssueCode,
    /// Path of the offending field; empty for the payload root.
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    fn at(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self { code, path: vec![field.to_owned()], message: message.into() }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// A non-empty, ordered list of validation issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Issue>);

impl ValidationErrors {
    /// The issues, in the order they were detected.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks `payload` against the user creation shape.
///
/// # Errors
/// Returns [`ValidationErrors`] listing every failing field when `payload` is
/// not an object or any of `name`, `email`, `role` is missing or invalid.
pub fn validate_new_user(payload: &Value) -> Result<NewUser, ValidationErrors> {
    let Some(fields) = payload.as_object() else {
        let issue = Issue {
            code: IssueCode::InvalidType,
            path: Vec::new(),
            message: format!("Expected object, received {}", json_kind(payload)),
        };
        return Err(ValidationErrors(vec![issue]));
    };

    let name = required_string(fields, "name").and_then(|name| {
        if name.chars().count() < NAME_MIN_CHARS {
            Err(Issue::at(
                "name",
                IssueCode::TooSmall,
                format!("String must contain at least {NAME_MIN_CHARS} character(s)"),
            ))
        } else {
            Ok(name)
        }
    });

    let email = required_string(fields, "email").and_then(|email| {
        if is_valid_email(email) {
            Ok(email)
        } else {
            Err(Issue::at("email", IssueCode::InvalidString, "Invalid email"))
        }
    });

    let role = required_string(fields, "role").and_then(|role| {
        role.parse::<Role>().map_err(|_| {
            Issue::at(
                "role",
                IssueCode::InvalidEnumValue,
                format!(
                    "Invalid enum value. Expected 'admin' | 'user' | 'viewer', received '{role}'"
                ),
            )
        })
    });

    match (name, email, role) {
        (Ok(name), Ok(email), Ok(role)) => Ok(NewUser {
            name: name.to_owned(),
            email: email.to_owned(),
            role,
        }),
        (name, email, role) => {
            let issues = [name.err(), email.err(), role.err()].into_iter().flatten().collect();
            Err(ValidationErrors(issues))
        }
    }
}

fn required_string<'a>(fields: &'a Map<String, Value>, field: &str) -> Result<&'a str, Issue> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(Issue::at(field, IssueCode::InvalidType, "Required")),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(Issue::at(
            field,
            IssueCode::InvalidType,
            format!("Expected string, received {}", json_kind(other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Local part of dot-separated atoms, then two or more domain labels with no
/// leading or trailing hyphen, ending in an alphabetic TLD.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+-]+(\.[A-Za-z0-9_'+-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$";

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern must compile"));

/// Returns `true` if `email` is `local@domain` under the accepted grammar.
///
/// Local part: `A-Z a-z 0-9 _ ' + - .`, no leading, trailing or doubled dot.
/// Domain: two or more labels of ASCII alphanumerics and `-` (no leading or
/// trailing hyphen), ending in an alphabetic TLD of at least two letters.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
