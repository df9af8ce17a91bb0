#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod registry;

pub use crate::catalog::{builtin_catalogs, load_catalog_file, parse_catalog};
pub use crate::error::StandardsError;
pub use crate::registry::SchemaRegistry;
