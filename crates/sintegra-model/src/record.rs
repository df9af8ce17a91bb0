use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, SchemaError};
use crate::field::FieldSchema;

/// Layout of one SINTEGRA record type.
///
/// Field order is significant: it is both the validation order and the
/// column order of the rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Two-character record type code written at the start of every line.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
}

/// Position of a column within a rendered line (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub field: &'a FieldSchema,
}

impl RecordSchema {
    pub fn new(code: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            code: code.into(),
            description: None,
            fields,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Total length of a rendered line, record type code included.
    pub fn line_width(&self) -> usize {
        self.code.len() + self.fields.iter().map(|f| f.width).sum::<usize>()
    }

    /// Look up a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Column positions of every field, in line order.
    pub fn columns(&self) -> Vec<ColumnSpan<'_>> {
        let mut start = self.code.len() + 1;
        self.fields
            .iter()
            .map(|field| {
                let span = ColumnSpan {
                    start,
                    end: start + field.width - 1,
                    field,
                };
                start += field.width;
                span
            })
            .collect()
    }

    /// Check the schema for configuration errors.
    pub fn check(&self) -> Result<()> {
        if self.code.len() != 2 || !self.code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(SchemaError::InvalidCode {
                code: self.code.clone(),
            });
        }
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema {
                code: self.code.clone(),
            });
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.key()) {
                return Err(SchemaError::DuplicateField {
                    code: self.code.clone(),
                    field: field.name.clone(),
                });
            }
            if field.width == 0 {
                return Err(SchemaError::ZeroWidth {
                    code: self.code.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSchema {
        RecordSchema::new(
            "74",
            vec![
                FieldSchema::string("DATA", 8),
                FieldSchema::numeric("VALOR", 13),
                FieldSchema::string("UF", 2),
            ],
        )
    }

    #[test]
    fn line_width_includes_code() {
        assert_eq!(sample().line_width(), 2 + 8 + 13 + 2);
    }

    #[test]
    fn columns_are_contiguous() {
        let schema = sample();
        let columns = schema.columns();
        assert_eq!((columns[0].start, columns[0].end), (3, 10));
        assert_eq!((columns[1].start, columns[1].end), (11, 23));
        assert_eq!((columns[2].start, columns[2].end), (24, 25));
    }

    #[test]
    fn field_lookup_ignores_case() {
        assert!(sample().field("valor").is_some());
        assert!(sample().field("missing").is_none());
    }

    #[test]
    fn check_rejects_broken_schemas() {
        assert!(sample().check().is_ok());

        let empty = RecordSchema::new("74", vec![]);
        assert!(matches!(empty.check(), Err(SchemaError::EmptySchema { .. })));

        let bad_code = RecordSchema::new("7", sample().fields);
        assert!(matches!(bad_code.check(), Err(SchemaError::InvalidCode { .. })));

        let duplicate = RecordSchema::new(
            "74",
            vec![FieldSchema::string("UF", 2), FieldSchema::string("uf", 2)],
        );
        assert!(matches!(
            duplicate.check(),
            Err(SchemaError::DuplicateField { .. })
        ));

        let zero = RecordSchema::new("74", vec![FieldSchema::string("UF", 0)]);
        assert!(matches!(zero.check(), Err(SchemaError::ZeroWidth { .. })));
    }
}
