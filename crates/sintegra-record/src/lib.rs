//! Validation and fixed-width rendering of SINTEGRA records.
//!
//! ```ignore
//! use sintegra_record::RecordEngine;
//! use sintegra_standards::SchemaRegistry;
//!
//! let registry = SchemaRegistry::builtin()?;
//! let engine = RecordEngine::new(registry.require("74")?.clone())?;
//! let record = engine.build(&input)?;
//! ```

#![deny(unsafe_code)]

pub mod ascii;
pub mod engine;
pub mod error;
pub mod format;
pub mod pad;
pub mod record;
pub mod validate;
pub mod writer;

pub use ascii::{AsciiNormalizer, Transliterator};
pub use engine::{RecordCheck, RecordEngine, build_record};
pub use error::{FieldIssue, FormatFailure, IssueKind, RecordError, Result, ValidationFailure};
pub use format::{Normalized, NumericFormatter, format_decimal};
pub use pad::{blank, pad};
pub use record::FormattedRecord;
pub use validate::{FieldRule, Pattern, validate};
pub use writer::{LineEnding, RecordWriter, WriterOptions, write_records};
