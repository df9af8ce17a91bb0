//! SINTEGRA record data model.
//!
//! Record types are described as data: a [`RecordSchema`] is an ordered list
//! of [`FieldSchema`] entries, each carrying its type, pattern, required flag,
//! [`FormatDirective`] and column width. Caller input arrives as a
//! [`RawInput`] map of [`FieldValue`]s.

pub mod directive;
pub mod error;
pub mod field;
pub mod record;
pub mod value;

pub use directive::{DecimalFormat, DecimalPlaces, FormatDirective};
pub use error::{Result, SchemaError};
pub use field::{EMAIL_PATTERN, FieldPattern, FieldSchema, FieldType};
pub use record::{ColumnSpan, RecordSchema};
pub use value::{FieldValue, RawInput, leading_number, looks_numeric, render_number};
