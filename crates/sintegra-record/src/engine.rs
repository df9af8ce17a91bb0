//! Record assembly.
//!
//! A [`RecordEngine`] is prepared once per record type: the schema is
//! checked and every field pattern compiled. Building a record then runs in
//! two passes over the schema fields:
//!
//! 1. validation of every field, collecting all issues
//! 2. formatting and padding, stopping at the first value that does not fit
//!
//! Registered [`RecordCheck`]s run on the finished line.

use std::collections::BTreeMap;
use std::fmt;

use sintegra_model::{FieldValue, RawInput, RecordSchema, SchemaError};
use tracing::{debug, debug_span, trace};

use crate::ascii::{AsciiNormalizer, Transliterator};
use crate::error::{FieldIssue, IssueKind, Result, ValidationFailure};
use crate::format::NumericFormatter;
use crate::pad::{blank, pad};
use crate::record::FormattedRecord;
use crate::validate::{FieldRule, validate};

/// Record-level check run after every field has been formatted.
///
/// Returned messages are reported as a [`ValidationFailure`].
pub trait RecordCheck: Send + Sync {
    fn check(&self, record: &FormattedRecord) -> Vec<String>;
}

impl<F> RecordCheck for F
where
    F: Fn(&FormattedRecord) -> Vec<String> + Send + Sync,
{
    fn check(&self, record: &FormattedRecord) -> Vec<String> {
        self(record)
    }
}

/// Builds fixed-width lines for one record type.
pub struct RecordEngine {
    schema: RecordSchema,
    rules: Vec<FieldRule>,
    normalizer: Box<dyn AsciiNormalizer>,
    checks: Vec<Box<dyn RecordCheck>>,
}

impl fmt::Debug for RecordEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordEngine")
            .field("code", &self.schema.code)
            .field("fields", &self.rules.len())
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}

impl RecordEngine {
    /// Prepare an engine for `schema`.
    pub fn new(schema: RecordSchema) -> std::result::Result<Self, SchemaError> {
        schema.check()?;
        let rules = schema
            .fields
            .iter()
            .map(|field| FieldRule::compile(field.clone(), &schema.code))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(
            record_type = %schema.code,
            fields = rules.len(),
            width = schema.line_width(),
            "prepared record engine"
        );
        Ok(Self {
            schema,
            rules,
            normalizer: Box::new(Transliterator),
            checks: Vec::new(),
        })
    }

    /// Replace the ASCII normalizer used for free text.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl AsciiNormalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Add a record-level check.
    #[must_use]
    pub fn with_check(mut self, check: impl RecordCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn code(&self) -> &str {
        &self.schema.code
    }

    /// Build one record from `input`.
    ///
    /// Keys of `input` that match no field are ignored. Absent fields take
    /// their schema default, if any.
    pub fn build(&self, input: &RawInput) -> Result<FormattedRecord> {
        let code = self.schema.code.as_str();
        let span = debug_span!("build_record", record_type = %code);
        let _guard = span.enter();

        let values: Vec<FieldValue> = self
            .rules
            .iter()
            .map(|rule| resolve(input, rule))
            .collect();

        let issues: Vec<FieldIssue> = self
            .rules
            .iter()
            .zip(&values)
            .filter_map(|(rule, value)| validate(value, rule, code))
            .collect();
        if !issues.is_empty() {
            debug!(issues = issues.len(), "record rejected");
            return Err(ValidationFailure::new(code, issues).into());
        }

        let formatter = NumericFormatter::new(self.normalizer.as_ref());
        let mut line = String::with_capacity(self.schema.line_width());
        line.push_str(code);
        let mut decimals = BTreeMap::new();
        for (rule, value) in self.rules.iter().zip(&values) {
            let field = &rule.field;
            let column = match formatter.format(value, field, code)? {
                Some(normalized) => {
                    if let Some(number) = normalized.decimal {
                        decimals.insert(field.key(), number);
                    }
                    pad(&normalized.text, field, code)?
                }
                None => blank(field),
            };
            trace!(field = %field.name, width = field.width, "column rendered");
            line.push_str(&column);
        }

        let record = FormattedRecord::new(code, line, decimals);
        let issues: Vec<FieldIssue> = self
            .checks
            .iter()
            .flat_map(|check| check.check(&record))
            .map(|message| FieldIssue::new(code, "", IssueKind::Check { message }))
            .collect();
        if !issues.is_empty() {
            debug!(issues = issues.len(), "record check failed");
            return Err(ValidationFailure::new(code, issues).into());
        }

        debug!(width = record.len(), "record built");
        Ok(record)
    }
}

fn resolve(input: &RawInput, rule: &FieldRule) -> FieldValue {
    match input.get(&rule.field.name) {
        Some(value) if !value.is_absent() => value.clone(),
        _ => rule
            .field
            .default
            .as_deref()
            .map_or(FieldValue::Absent, FieldValue::from),
    }
}

/// Prepare an engine for `schema` and build a single record.
pub fn build_record(input: &RawInput, schema: &RecordSchema) -> Result<FormattedRecord> {
    RecordEngine::new(schema.clone())?.build(input)
}
