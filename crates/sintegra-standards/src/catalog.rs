#![deny(unsafe_code)]

//! Record type catalogs.
//!
//! Each record type is one TOML document: a `code`, an optional
//! `description` and an ordered `[[fields]]` array. The built-in catalogs are
//! compiled into the binary.

use std::path::Path;

use sintegra_model::RecordSchema;

use crate::error::StandardsError;

/// Built-in catalogs as `(file name, contents)` pairs.
const BUILTIN_CATALOGS: &[(&str, &str)] = &[
    ("70.toml", include_str!("../catalogs/70.toml")),
    ("74.toml", include_str!("../catalogs/74.toml")),
    ("75.toml", include_str!("../catalogs/75.toml")),
];

/// Parse and check one catalog document. `origin` names the source in errors.
pub fn parse_catalog(contents: &str, origin: &str) -> Result<RecordSchema, StandardsError> {
    let schema: RecordSchema = toml::from_str(contents).map_err(|e| StandardsError::Toml {
        origin: origin.to_string(),
        source: e,
    })?;
    schema.check().map_err(|e| StandardsError::Schema {
        origin: origin.to_string(),
        source: e,
    })?;
    Ok(schema)
}

/// Read and parse a catalog file.
pub fn load_catalog_file(path: &Path) -> Result<RecordSchema, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    parse_catalog(&contents, &path.display().to_string())
}

/// Parse every built-in catalog.
pub fn builtin_catalogs() -> Result<Vec<RecordSchema>, StandardsError> {
    BUILTIN_CATALOGS
        .iter()
        .map(|(name, contents)| parse_catalog(contents, &format!("builtin:{name}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogs_parse() {
        let catalogs = builtin_catalogs().expect("builtin catalogs");
        let codes: Vec<&str> = catalogs.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["70", "74", "75"]);
    }

    #[test]
    fn builtin_layouts_have_expected_widths() {
        for schema in builtin_catalogs().expect("builtin catalogs") {
            let expected = match schema.code.as_str() {
                "70" | "75" => 126,
                "74" => 81,
                other => panic!("unexpected record type {other}"),
            };
            assert_eq!(schema.line_width(), expected, "record {}", schema.code);
        }
    }

    #[test]
    fn rejects_unparseable_directive() {
        let doc = r#"
code = "99"
[[fields]]
name = "VALOR"
type = "numeric"
format = "13x2"
width = 13
"#;
        let err = parse_catalog(doc, "test").unwrap_err();
        assert!(matches!(err, StandardsError::Toml { .. }));
    }

    #[test]
    fn rejects_unknown_field_type() {
        let doc = r#"
code = "99"
[[fields]]
name = "DATA"
type = "date"
width = 8
"#;
        let err = parse_catalog(doc, "test").unwrap_err();
        assert!(matches!(err, StandardsError::Toml { .. }));
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn rejects_empty_field_list() {
        let doc = r#"
code = "99"
fields = []
"#;
        let err = parse_catalog(doc, "test").unwrap_err();
        assert!(matches!(err, StandardsError::Schema { .. }));
    }
}
