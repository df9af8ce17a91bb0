//! Raw input values.
//!
//! Callers hand the engine a loosely typed map of field values. Keys are
//! case-insensitive and normalized to lower case once, here, at the boundary.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A single input value: text, a number, or nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    #[default]
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Absent, or text with no characters.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// The value coerced to text, or `None` when absent.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(text) => Some(Cow::Borrowed(text)),
            FieldValue::Number(number) => Some(Cow::Owned(render_number(*number))),
            FieldValue::Absent => None,
        }
    }

    /// True when the value reads as a number.
    pub fn is_numeric(&self) -> bool {
        match self {
            FieldValue::Text(text) => looks_numeric(text),
            FieldValue::Number(number) => number.is_finite(),
            FieldValue::Absent => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}

/// Render a number the way it is written into a column: integral values
/// carry no decimal point and negative zero collapses to `0`.
pub fn render_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Returns true if `text` is a decimal number, optionally signed, with an
/// optional exponent and surrounding whitespace.
pub fn looks_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return false;
    }
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return false;
    }
    trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Read the leading number of `text`, ignoring any trailing garbage.
/// Text without a leading number reads as `0`.
pub fn leading_number(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let candidate: &str = {
        let end = trimmed
            .bytes()
            .position(|b| !(b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')))
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Field values keyed by lower-case field name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, FieldValue>")]
pub struct RawInput {
    values: BTreeMap<String, FieldValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Keys that differ only by case replace each other.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<FieldValue>) {
        self.values
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value for `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(&key.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, FieldValue>> for RawInput {
    fn from(values: BTreeMap<String, FieldValue>) -> Self {
        values.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RawInput
where
    K: AsRef<str>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = RawInput::new();
        for (key, value) in iter {
            input.insert(key, value);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let input = RawInput::new().with("DATA_INVENTARIO", "20201231");
        assert_eq!(input.get("data_inventario"), Some(&"20201231".into()));
        assert_eq!(input.get("Data_Inventario"), Some(&"20201231".into()));
    }

    #[test]
    fn later_key_wins_on_case_collision() {
        let input = RawInput::new().with("UF", "SC").with("uf", "SP");
        assert_eq!(input.len(), 1);
        assert_eq!(input.get("UF"), Some(&"SP".into()));
    }

    #[test]
    fn deserializes_value_union_from_json() {
        let input: RawInput =
            serde_json::from_str(r#"{"CNPJ": 12345678000190, "UF": "SC", "IE": null}"#).unwrap();
        assert_eq!(input.get("cnpj"), Some(&FieldValue::Number(12345678000190.0)));
        assert_eq!(input.get("uf"), Some(&FieldValue::Text("SC".into())));
        assert_eq!(input.get("ie"), Some(&FieldValue::Absent));
    }

    #[test]
    fn numeric_detection() {
        for text in ["9", "0000000009", "-1.5", ".5", "1.", "1e3", " 42 "] {
            assert!(looks_numeric(text), "{text} should be numeric");
        }
        for text in ["", "abc", "1,5", "inf", "NaN", "12a", "-", "."] {
            assert!(!looks_numeric(text), "{text} should not be numeric");
        }
    }

    #[test]
    fn leading_number_reads_prefix() {
        assert_eq!(leading_number("0000000009"), 9.0);
        assert_eq!(leading_number("12.5abc"), 12.5);
        assert_eq!(leading_number("abc"), 0.0);
        assert_eq!(leading_number("1e"), 1.0);
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(render_number(9.0), "9");
        assert_eq!(render_number(12.5), "12.5");
        assert_eq!(render_number(-0.0), "0");
        assert_eq!(FieldValue::from(6).as_text().unwrap(), "6");
    }
}
