//! Error types for record construction.
//!
//! Building a record can fail in two ways:
//! - [`ValidationFailure`]: every field-level problem found in the input,
//!   collected across the whole record before giving up.
//! - [`FormatFailure`]: the first field whose formatted value cannot fit its
//!   declared directive or width, or that is not ASCII. Not aggregated.

use std::fmt;

use sintegra_model::SchemaError;
use thiserror::Error;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Required field missing or null.
    Required,
    /// Value of an `integer` field does not read as a number.
    NotInteger,
    /// Value of a `numeric` field does not read as a number.
    NotNumeric,
    /// Value failed the e-mail shape check.
    InvalidEmail { value: String },
    /// Value does not match the field pattern.
    PatternMismatch { value: String, pattern: String },
    /// Message raised by a record-level check.
    Check { message: String },
}

/// A field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub record_type: String,
    /// Field name as declared in the schema; empty for record-level checks.
    pub field: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(record_type: &str, field: &str, kind: IssueKind) -> Self {
        Self {
            record_type: record_type.to_string(),
            field: field.to_string(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (record, field) = (&self.record_type, &self.field);
        match &self.kind {
            IssueKind::Required => write!(f, "[{record}] {field} is required"),
            IssueKind::NotInteger => {
                write!(f, "[{record}] field {field} must be an integer value")
            }
            IssueKind::NotNumeric => write!(f, "[{record}] field {field} must be a number"),
            IssueKind::InvalidEmail { value } => {
                write!(f, "[{record}] field {field}: e-mail [{value}] is invalid")
            }
            IssueKind::PatternMismatch { value, pattern } => write!(
                f,
                "[{record}] field {field}: invalid value [{value}] (pattern: {pattern})"
            ),
            IssueKind::Check { message } => write!(f, "[{record}] {message}"),
        }
    }
}

/// Every validation problem found in one record, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub record_type: String,
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn new(record_type: &str, issues: Vec<FieldIssue>) -> Self {
        Self {
            record_type: record_type.to_string(),
            issues,
        }
    }

    /// Names of the fields that failed, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.field.as_str())
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// A formatted value that cannot be represented by its column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatFailure {
    /// Integer part longer than a decimal directive allows.
    #[error(
        "[{record_type}] field {field} is larger than allowed by format {directive} ({digits} integer digits)"
    )]
    DecimalOverflow {
        record_type: String,
        field: String,
        directive: String,
        digits: usize,
    },

    /// Formatted value longer than the column width.
    #[error(
        "[{record_type}] field {field} formats to {length} characters but the column is {width} wide"
    )]
    WidthOverflow {
        record_type: String,
        field: String,
        width: usize,
        length: usize,
    },

    /// Value still carries non-ASCII characters after normalization.
    #[error("[{record_type}] field {field} has non-ASCII value [{value}]")]
    NonAscii {
        record_type: String,
        field: String,
        value: String,
    },
}

impl FormatFailure {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::DecimalOverflow { field, .. }
            | Self::WidthOverflow { field, .. }
            | Self::NonAscii { field, .. } => field,
        }
    }
}

/// Errors raised by the record engine and writer.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    #[error("{0}")]
    Format(#[from] FormatFailure),

    #[error("invalid record schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
