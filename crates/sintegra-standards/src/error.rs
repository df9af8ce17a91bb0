#![deny(unsafe_code)]

use std::path::PathBuf;

use sintegra_model::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML catalog {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog {origin}: {source}")]
    Schema {
        origin: String,
        #[source]
        source: SchemaError,
    },

    #[error("record type {code} is defined twice (second definition in {origin})")]
    DuplicateRecordType { code: String, origin: String },

    #[error("unknown record type: {code}")]
    UnknownRecordType { code: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
