use serde::{Deserialize, Serialize};
use std::fmt;

use crate::directive::FormatDirective;

/// Pattern sentinel that switches a field to e-mail validation.
pub const EMAIL_PATTERN: &str = "email";

/// Declared type of a field.
///
/// Numeric types are validated as numbers and right-aligned with zeros;
/// string fields are left-aligned with spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Numeric,
    String,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Numeric => "numeric",
            FieldType::String => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Numeric)
    }

    /// Fill character used to pad a column of this type.
    pub fn fill_char(&self) -> char {
        if self.is_numeric() { '0' } else { ' ' }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern check declared by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPattern<'a> {
    Email,
    Regex(&'a str),
}

/// One column of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub format: FormatDirective,
    pub width: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Literal substituted when the input omits the field or sends null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, field_type: FieldType, width: usize) -> Self {
        Self {
            name: name.into(),
            field_type,
            regex: None,
            required: false,
            format: FormatDirective::None,
            width,
            info: None,
            default: None,
        }
    }

    pub fn string(name: impl Into<String>, width: usize) -> Self {
        Self::new(name, FieldType::String, width)
    }

    pub fn numeric(name: impl Into<String>, width: usize) -> Self {
        Self::new(name, FieldType::Numeric, width)
    }

    pub fn integer(name: impl Into<String>, width: usize) -> Self {
        Self::new(name, FieldType::Integer, width)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatDirective) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Lower-case lookup key for this field.
    pub fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    /// Pattern check for this field, if any. An empty regex means no check.
    pub fn pattern(&self) -> Option<FieldPattern<'_>> {
        match self.regex.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(EMAIL_PATTERN) => Some(FieldPattern::Email),
            Some(_) => self.regex.as_deref().map(FieldPattern::Regex),
        }
    }

    /// Character that fills the column when the field carries no value.
    ///
    /// String fields and `empty`-formatted fields stay blank; every other
    /// numeric field is zero-filled.
    pub fn blank_char(&self) -> char {
        if self.format.keeps_blank() {
            ' '
        } else {
            self.field_type.fill_char()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_recognizes_email_sentinel() {
        let field = FieldSchema::string("EMAIL", 50).with_regex("email");
        assert_eq!(field.pattern(), Some(FieldPattern::Email));

        let field = FieldSchema::string("UF", 2).with_regex("^(SC|SP)$");
        assert_eq!(field.pattern(), Some(FieldPattern::Regex("^(SC|SP)$")));

        let field = FieldSchema::string("OBS", 10).with_regex("");
        assert_eq!(field.pattern(), None);
    }

    #[test]
    fn blank_char_follows_type_and_directive() {
        assert_eq!(FieldSchema::string("IE", 14).blank_char(), ' ');
        assert_eq!(FieldSchema::numeric("CNPJ", 14).blank_char(), '0');
        assert_eq!(
            FieldSchema::numeric("UF", 2)
                .with_format(FormatDirective::Empty)
                .blank_char(),
            ' '
        );
    }
}
