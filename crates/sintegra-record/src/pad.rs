//! Column padding.

use sintegra_model::{FieldSchema, FieldType};

use crate::error::FormatFailure;
use crate::format::{left_pad, right_pad};

/// Pad a formatted value to the column width of `field`.
///
/// String columns are left-aligned with spaces; numeric columns are
/// right-aligned with zeros. The result is upper-cased. Values are never
/// truncated: a value wider than its column is a [`FormatFailure`].
pub fn pad(value: &str, field: &FieldSchema, record_type: &str) -> Result<String, FormatFailure> {
    let length = value.chars().count();
    if length > field.width {
        return Err(FormatFailure::WidthOverflow {
            record_type: record_type.to_string(),
            field: field.name.clone(),
            width: field.width,
            length,
        });
    }
    if !value.is_ascii() {
        return Err(FormatFailure::NonAscii {
            record_type: record_type.to_string(),
            field: field.name.clone(),
            value: value.to_string(),
        });
    }
    let padded = match field.field_type {
        FieldType::String => right_pad(value, field.width, ' '),
        FieldType::Integer | FieldType::Numeric => left_pad(value, field.width, '0'),
    };
    Ok(padded.to_ascii_uppercase())
}

/// Blank column for a field without a value.
pub fn blank(field: &FieldSchema) -> String {
    std::iter::repeat_n(field.blank_char(), field.width).collect()
}
