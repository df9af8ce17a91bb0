use std::collections::BTreeMap;
use std::fmt;

/// One rendered fixed-width line.
///
/// The line carries no terminator; [`crate::RecordWriter`] adds one when
/// records are joined into a file.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRecord {
    record_type: String,
    line: String,
    decimals: BTreeMap<String, f64>,
}

impl FormattedRecord {
    pub(crate) fn new(record_type: &str, line: String, decimals: BTreeMap<String, f64>) -> Self {
        Self {
            record_type: record_type.to_string(),
            line,
            decimals,
        }
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Line length in bytes. Columns are ASCII, so this is also the
    /// character count.
    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn into_string(self) -> String {
        self.line
    }

    /// Parsed value of a field formatted with a decimal directive.
    pub fn decimal_value(&self, field: &str) -> Option<f64> {
        self.decimals.get(&field.to_ascii_lowercase()).copied()
    }

    /// Every decimal-formatted value, keyed by lower-case field name.
    pub fn decimals(&self) -> &BTreeMap<String, f64> {
        &self.decimals
    }
}

impl fmt::Display for FormattedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl AsRef<str> for FormattedRecord {
    fn as_ref(&self) -> &str {
        &self.line
    }
}
