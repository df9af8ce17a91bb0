//! Field validation.
//!
//! Each field is checked independently against its schema entry:
//! 1. absent or empty optional values pass without further checks
//! 2. required values must be present
//! 3. `integer` and `numeric` fields must read as numbers
//! 4. the value, as text, must fully match the field pattern (or be a
//!    well-formed e-mail address when the pattern is the `email` sentinel)
//!
//! String fields accept any value of the input union; numbers are checked
//! against the pattern in their rendered form.

use std::sync::LazyLock;

use regex::Regex;
use sintegra_model::{FieldPattern, FieldSchema, FieldType, FieldValue, SchemaError};

use crate::error::{FieldIssue, IssueKind};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid e-mail regex")
});

/// Compiled pattern check of a field.
#[derive(Debug, Clone)]
pub enum Pattern {
    Email,
    Regex { source: String, regex: Regex },
}

/// A schema entry with its pattern compiled.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FieldSchema,
    pub pattern: Option<Pattern>,
}

impl FieldRule {
    /// Compile the pattern of `field`. Patterns must match the whole value,
    /// so the declared regex is anchored on both ends.
    pub fn compile(field: FieldSchema, record_type: &str) -> Result<Self, SchemaError> {
        let pattern = match field.pattern() {
            None => None,
            Some(FieldPattern::Email) => Some(Pattern::Email),
            Some(FieldPattern::Regex(source)) => {
                let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
                    SchemaError::InvalidPattern {
                        code: record_type.to_string(),
                        field: field.name.clone(),
                        message: e.to_string(),
                    }
                })?;
                Some(Pattern::Regex {
                    source: source.to_string(),
                    regex,
                })
            }
        };
        Ok(Self { field, pattern })
    }
}

/// Validate one value against its field rule.
///
/// Returns at most one issue; the first failing check wins.
pub fn validate(value: &FieldValue, rule: &FieldRule, record_type: &str) -> Option<FieldIssue> {
    let field = &rule.field;
    let issue = |kind| Some(FieldIssue::new(record_type, &field.name, kind));

    if value.is_absent() {
        return if field.required {
            issue(IssueKind::Required)
        } else {
            None
        };
    }
    if value.is_empty() && !field.required {
        return None;
    }

    match field.field_type {
        FieldType::Integer if !value.is_numeric() => return issue(IssueKind::NotInteger),
        FieldType::Numeric if !value.is_numeric() => return issue(IssueKind::NotNumeric),
        _ => {}
    }

    let text = value.as_text().unwrap_or_default();
    match &rule.pattern {
        None => None,
        Some(Pattern::Email) => {
            if is_email(&text) {
                None
            } else {
                issue(IssueKind::InvalidEmail {
                    value: text.into_owned(),
                })
            }
        }
        Some(Pattern::Regex { source, regex }) => {
            if regex.is_match(&text) {
                None
            } else {
                issue(IssueKind::PatternMismatch {
                    value: text.into_owned(),
                    pattern: source.clone(),
                })
            }
        }
    }
}

fn is_email(text: &str) -> bool {
    let Some((local, domain)) = text.rsplit_once('@') else {
        return false;
    };
    local.len() <= 64 && domain.len() <= 253 && EMAIL_REGEX.is_match(text)
}
