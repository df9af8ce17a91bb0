use thiserror::Error;

/// Configuration errors raised while reading or checking a record schema.
///
/// These describe a broken catalog rather than bad caller input, so they are
/// surfaced when a schema is loaded or an engine is prepared, never while a
/// record is being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("record type code '{code}' must be exactly 2 ASCII alphanumeric characters")]
    InvalidCode { code: String },

    #[error("record type {code} declares no fields")]
    EmptySchema { code: String },

    #[error("record type {code}: duplicate field {field}")]
    DuplicateField { code: String, field: String },

    #[error("record type {code}: field {field} must have a positive width")]
    ZeroWidth { code: String, field: String },

    #[error("record type {code}: field {field} has an invalid pattern: {message}")]
    InvalidPattern {
        code: String,
        field: String,
        message: String,
    },

    #[error("invalid format directive '{directive}': {message}")]
    InvalidDirective { directive: String, message: String },
}

impl SchemaError {
    pub(crate) fn invalid_directive(directive: &str, message: impl Into<String>) -> Self {
        Self::InvalidDirective {
            directive: directive.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
