//! Building many records from one JSON input file.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sintegra_model::RawInput;
use sintegra_record::{FormattedRecord, RecordEngine};
use sintegra_standards::SchemaRegistry;
use tracing::{debug, info, info_span, warn};

/// One record request of the input file.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchEntry {
    /// Record type code.
    pub register: String,
    #[serde(default)]
    pub fields: RawInput,
}

/// A record that could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the entry in the input, starting at 0.
    pub index: usize,
    pub register: String,
    pub message: String,
}

/// Built and failed counts for one record type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterTally {
    pub built: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records built successfully, in input order.
    pub records: Vec<FormattedRecord>,
    pub failures: Vec<BatchFailure>,
    pub tallies: BTreeMap<String, RegisterTally>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Rendered lines joined with `\n`.
    pub fn lines(&self) -> String {
        self.records
            .iter()
            .map(FormattedRecord::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a JSON array of [`BatchEntry`] objects.
pub fn parse_batch(contents: &str) -> Result<Vec<BatchEntry>> {
    serde_json::from_str(contents).context("parse record batch")
}

pub fn read_batch(path: &Path) -> Result<Vec<BatchEntry>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_batch(&contents).with_context(|| format!("in {}", path.display()))
}

/// Build every entry, preparing one engine per record type.
///
/// Failures are collected per entry; the remaining entries are still built.
pub fn build_batch(registry: &SchemaRegistry, entries: &[BatchEntry]) -> BatchReport {
    let span = info_span!("batch", entries = entries.len());
    let _guard = span.enter();

    let mut engines = BTreeMap::new();
    let mut report = BatchReport::default();
    for (index, entry) in entries.iter().enumerate() {
        let register = entry.register.trim();
        let outcome = engine_for(&mut engines, registry, register)
            .and_then(|engine| engine.build(&entry.fields).map_err(|e| e.to_string()));
        let tally = report.tallies.entry(register.to_string()).or_default();
        match outcome {
            Ok(record) => {
                debug!(index, register, "record built");
                tally.built += 1;
                report.records.push(record);
            }
            Err(message) => {
                warn!(index, register, "record rejected");
                tally.failed += 1;
                report.failures.push(BatchFailure {
                    index,
                    register: register.to_string(),
                    message,
                });
            }
        }
    }
    info!(
        built = report.records.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    report
}

fn engine_for<'a>(
    engines: &'a mut BTreeMap<String, RecordEngine>,
    registry: &SchemaRegistry,
    register: &str,
) -> std::result::Result<&'a RecordEngine, String> {
    match engines.entry(register.to_string()) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let schema = registry.require(register).map_err(|e| e.to_string())?;
            let engine = RecordEngine::new(schema.clone()).map_err(|e| e.to_string())?;
            Ok(entry.insert(engine))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_deserialize_with_mixed_value_types() {
        let entries = parse_batch(
            r#"[{"register": "74", "fields": {"QUANTIDADE": 9, "UF": "SC", "IE_POSSUIDOR": null}}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].register, "74");
        assert_eq!(entries[0].fields.len(), 3);
    }

    #[test]
    fn missing_fields_object_is_empty_input() {
        let entries = parse_batch(r#"[{"register": "74"}]"#).unwrap();
        assert!(entries[0].fields.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_batch(r#"{"register": "74"}"#).is_err());
    }

    #[test]
    fn unknown_register_is_reported_per_entry() {
        let registry = SchemaRegistry::builtin().unwrap();
        let entries = parse_batch(r#"[{"register": "99", "fields": {}}]"#).unwrap();
        let report = build_batch(&registry, &entries);
        assert!(report.has_failures());
        assert_eq!(report.failures[0].index, 0);
        assert_eq!(report.failures[0].register, "99");
        assert_eq!(report.tallies["99"], RegisterTally { built: 0, failed: 1 });
    }
}
