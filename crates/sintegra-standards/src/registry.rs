#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sintegra_model::RecordSchema;
use tracing::{debug, info};

use crate::catalog::{builtin_catalogs, load_catalog_file};
use crate::error::StandardsError;

/// Record type code → schema. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, RecordSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in catalog.
    pub fn builtin() -> Result<Self, StandardsError> {
        let mut registry = Self::new();
        for schema in builtin_catalogs()? {
            registry.insert(schema, "builtin")?;
        }
        debug!(count = registry.len(), "loaded builtin catalogs");
        Ok(registry)
    }

    /// Add a schema. Fails if the record type is already registered.
    pub fn insert(&mut self, schema: RecordSchema, origin: &str) -> Result<(), StandardsError> {
        schema.check().map_err(|e| StandardsError::Schema {
            origin: origin.to_string(),
            source: e,
        })?;
        if self.schemas.contains_key(&schema.code) {
            return Err(StandardsError::DuplicateRecordType {
                code: schema.code,
                origin: origin.to_string(),
            });
        }
        self.schemas.insert(schema.code.clone(), schema);
        Ok(())
    }

    /// Add or replace a schema, returning the one it replaced.
    pub fn replace(&mut self, schema: RecordSchema) -> Option<RecordSchema> {
        self.schemas.insert(schema.code.clone(), schema)
    }

    /// Load every `*.toml` catalog in `dir`, replacing registered record types
    /// with the same code. Two files in `dir` defining the same code is an
    /// error. Returns the number of catalogs loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, StandardsError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| StandardsError::io(dir, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut loaded: BTreeMap<String, RecordSchema> = BTreeMap::new();
        for path in &paths {
            let schema = load_catalog_file(path)?;
            if loaded.contains_key(&schema.code) {
                return Err(StandardsError::DuplicateRecordType {
                    code: schema.code,
                    origin: path.display().to_string(),
                });
            }
            loaded.insert(schema.code.clone(), schema);
        }

        let count = loaded.len();
        for schema in loaded.into_values() {
            let code = schema.code.clone();
            if self.replace(schema).is_some() {
                info!(record_type = %code, dir = %dir.display(), "catalog overrides registered layout");
            }
        }
        debug!(count, dir = %dir.display(), "loaded catalog directory");
        Ok(count)
    }

    pub fn get(&self, code: &str) -> Option<&RecordSchema> {
        self.schemas.get(code)
    }

    /// Like [`get`](Self::get) but reports unknown codes as an error.
    pub fn require(&self, code: &str) -> Result<&RecordSchema, StandardsError> {
        self.get(code).ok_or_else(|| StandardsError::UnknownRecordType {
            code: code.to_string(),
        })
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
