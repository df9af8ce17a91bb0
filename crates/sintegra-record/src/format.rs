//! Numeric format directives applied before padding.

use std::borrow::Cow;

use sintegra_model::{
    DecimalFormat, FieldSchema, FieldValue, FormatDirective, leading_number, looks_numeric,
    render_number,
};
use tracing::trace;

use crate::ascii::AsciiNormalizer;
use crate::error::FormatFailure;

/// Output of the formatter for one present value.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub text: String,
    /// Parsed value of a decimal-formatted field.
    pub decimal: Option<f64>,
}

impl Normalized {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            decimal: None,
        }
    }
}

/// Applies a field's [`FormatDirective`] to its raw value.
pub struct NumericFormatter<'a> {
    normalizer: &'a dyn AsciiNormalizer,
}

impl<'a> NumericFormatter<'a> {
    pub fn new(normalizer: &'a dyn AsciiNormalizer) -> Self {
        Self { normalizer }
    }

    /// Format a present value. Returns `None` for absent values, which the
    /// padder renders as a blank column.
    pub fn format(
        &self,
        value: &FieldValue,
        field: &FieldSchema,
        record_type: &str,
    ) -> Result<Option<Normalized>, FormatFailure> {
        let text = match value {
            FieldValue::Absent => return Ok(None),
            FieldValue::Number(number) => render_number(*number),
            FieldValue::Text(text) if looks_numeric(text) && is_printable_ascii(text) => {
                text.clone()
            }
            FieldValue::Text(text) => self.normalizer.to_ascii(text),
        };

        let directive = &field.format;
        if directive.is_none() {
            return Ok(Some(Normalized::text(text)));
        }

        let text: Cow<'_, str> = if text.trim().is_empty() && !directive.keeps_blank() {
            Cow::Borrowed("0")
        } else {
            Cow::Owned(text)
        };

        trace!(field = %field.name, directive = %directive, "formatting value");
        let normalized = match directive {
            FormatDirective::None => Normalized::text(text),
            FormatDirective::TotalNumber => Normalized::text(left_pad(
                &render_number(leading_number(&text)),
                field.width,
                '0',
            )),
            FormatDirective::Aliquota => Normalized::text(left_pad(&text, field.width, '0')),
            FormatDirective::Empty => Normalized::text(right_pad(&text, field.width, ' ')),
            FormatDirective::Decimal(format) => {
                let number = leading_number(&text);
                let formatted = format_decimal(number, format).ok_or_else(|| {
                    FormatFailure::DecimalOverflow {
                        record_type: record_type.to_string(),
                        field: field.name.clone(),
                        directive: directive.to_string(),
                        digits: integer_digits(number),
                    }
                })?;
                Normalized {
                    text: formatted,
                    decimal: Some(number),
                }
            }
        };
        Ok(Some(normalized))
    }
}

pub(crate) fn left_pad(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut out: String = std::iter::repeat_n(fill, width - len).collect();
    out.push_str(text);
    out
}

pub(crate) fn right_pad(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    let mut out = text.to_string();
    out.extend(std::iter::repeat_n(fill, width.saturating_sub(len)));
    out
}

fn is_printable_ascii(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_graphic())
}

/// Significant decimal precision used when reading a float's digits.
const SIGNIFICANT_DIGITS: usize = 14;

/// Plain decimal digits of `value` at [`SIGNIFICANT_DIGITS`] precision with
/// trailing fractional zeros trimmed: `(negative, integer part, fraction)`.
///
/// `1.1 * 3.0` reads as `3.3`, not `3.3000000000000003`.
fn decimal_parts(value: f64) -> (bool, String, String) {
    if value == 0.0 || !value.is_finite() {
        return (false, "0".to_string(), String::new());
    }
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let point = exponent + 1;
    let (int_part, frac) = if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{zeros}{digits}"))
    } else {
        let point = point as usize;
        if point >= digits.len() {
            let zeros = "0".repeat(point - digits.len());
            (format!("{digits}{zeros}"), String::new())
        } else {
            (digits[..point].to_string(), digits[point..].to_string())
        }
    };
    (value < 0.0, int_part, frac)
}

/// Characters left of the decimal point, sign included.
fn integer_digits(value: f64) -> usize {
    let (negative, int_part, _) = decimal_parts(value);
    int_part.len() + usize::from(negative)
}

/// Render `value` under a decimal directive with a comma separator.
///
/// Returns `None` when the integer part is wider than the directive allows.
/// The value is read at 14 significant digits, so binary noise does not count
/// as supplied precision. Rounding is half away from zero on those digits:
/// `2.675` rounds to `2,68`.
pub fn format_decimal(value: f64, format: &DecimalFormat) -> Option<String> {
    if integer_digits(value) > format.int_digits {
        return None;
    }
    let (negative, mut int_part, mut frac) = decimal_parts(value);
    let places = format.places.resolve(frac.len());

    if frac.len() > places {
        let round_up = frac.as_bytes()[places] >= b'5';
        frac.truncate(places);
        if round_up {
            (int_part, frac) = increment(&int_part, &frac);
        }
    }
    frac.extend(std::iter::repeat_n('0', places - frac.len()));

    let is_zero = int_part.bytes().chain(frac.bytes()).all(|b| b == b'0');
    let mut out = String::with_capacity(int_part.len() + frac.len() + 2);
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(&int_part);
    if places > 0 {
        out.push(',');
        out.push_str(&frac);
    }
    Some(out)
}

/// Add one unit in the last place of `int_part.frac`, carrying leftwards.
fn increment(int_part: &str, frac: &str) -> (String, String) {
    let mut digits: Vec<u8> = int_part.bytes().chain(frac.bytes()).collect();
    let mut idx = digits.len();
    loop {
        if idx == 0 {
            digits.insert(0, b'1');
            break;
        }
        idx -= 1;
        if digits[idx] == b'9' {
            digits[idx] = b'0';
        } else {
            digits[idx] += 1;
            break;
        }
    }
    let split = digits.len() - frac.len();
    let text = String::from_utf8_lossy(&digits);
    (text[..split].to_string(), text[split..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::Transliterator;

    fn format(value: impl Into<FieldValue>, field: &FieldSchema) -> Result<String, FormatFailure> {
        NumericFormatter::new(&Transliterator)
            .format(&value.into(), field, "70")
            .map(|n| n.map(|n| n.text).unwrap_or_default())
    }

    fn decimal(spec: &str) -> FieldSchema {
        FieldSchema::numeric("VALOR", 14).with_format(spec.parse().unwrap())
    }

    #[test]
    fn total_number_casts_and_zero_pads() {
        let field = FieldSchema::numeric("QUANTIDADE", 10).with_format(FormatDirective::TotalNumber);
        assert_eq!(format("0000000009", &field).unwrap(), "0000000009");
        assert_eq!(format(42, &field).unwrap(), "0000000042");
        assert_eq!(format("", &field).unwrap(), "0000000000");
    }

    #[test]
    fn aliquota_pads_text_as_given() {
        let field = FieldSchema::numeric("ALIQUOTA_ICMS", 4).with_format(FormatDirective::Aliquota);
        assert_eq!(format("17", &field).unwrap(), "0017");
        assert_eq!(format("07", &field).unwrap(), "0007");
        assert_eq!(format(" ", &field).unwrap(), "0000");
    }

    #[test]
    fn empty_directive_keeps_blank_and_right_pads() {
        let field = FieldSchema::numeric("SUB_SERIE", 2).with_format(FormatDirective::Empty);
        assert_eq!(format("", &field).unwrap(), "  ");
        assert_eq!(format("1", &field).unwrap(), "1 ");
    }

    #[test]
    fn no_directive_transliterates_text() {
        let field = FieldSchema::string("DESCRICAO", 53);
        assert_eq!(format("Pão de açúcar", &field).unwrap(), "Pao de acucar");
        assert_eq!(format("", &field).unwrap(), "");
    }

    #[test]
    fn absent_value_is_not_formatted() {
        let field = FieldSchema::numeric("CNPJ", 14).with_format(FormatDirective::TotalNumber);
        let out = NumericFormatter::new(&Transliterator)
            .format(&FieldValue::Absent, &field, "70")
            .unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn fixed_decimal_places() {
        assert_eq!(format("12.5", &decimal("13v2")).unwrap(), "12,50");
        assert_eq!(format(3, &decimal("13v2")).unwrap(), "3,00");
        assert_eq!(format("2.675", &decimal("13v2")).unwrap(), "2,68");
        assert_eq!(format("9.999", &decimal("13v2")).unwrap(), "10,00");
        assert_eq!(format("12.5", &decimal("13v0")).unwrap(), "13");
    }

    #[test]
    fn ranged_decimal_places_clamp() {
        let field = decimal("10v2-4");
        assert_eq!(format("1.5", &field).unwrap(), "1,50");
        assert_eq!(format("1.123", &field).unwrap(), "1,123");
        assert_eq!(format("1.123456", &field).unwrap(), "1,1235");
    }

    #[test]
    fn negative_values_keep_sign_unless_zero() {
        assert_eq!(format("-1.5", &decimal("13v2")).unwrap(), "-1,50");
        assert_eq!(format("-0.001", &decimal("13v2")).unwrap(), "0,00");
    }

    #[test]
    fn float_noise_is_not_supplied_precision() {
        let field = decimal("5v2-4");
        assert_eq!(format(1.1 * 3.0, &field).unwrap(), "3,30");
        assert_eq!(format(0.1 + 0.2, &field).unwrap(), "0,30");
        assert_eq!(format(0.001, &field).unwrap(), "0,001");
        assert_eq!(format(1500.0, &decimal("13v2")).unwrap(), "1500,00");
    }

    #[test]
    fn non_ascii_numeric_text_is_transliterated() {
        let field = FieldSchema::string("CODIGO_PRODUTO", 14);
        assert_eq!(format("\u{a0}16", &field).unwrap(), " 16");
        assert_eq!(format("16", &field).unwrap(), "16");
    }

    #[test]
    fn decimal_records_parsed_value() {
        let out = NumericFormatter::new(&Transliterator)
            .format(&"12.5".into(), &decimal("13v2"), "70")
            .unwrap()
            .unwrap();
        assert_eq!(out.decimal, Some(12.5));
    }

    #[test]
    fn decimal_integer_overflow_is_fatal() {
        let err = format("12345.6", &decimal("3v2")).unwrap_err();
        assert_eq!(
            err,
            FormatFailure::DecimalOverflow {
                record_type: "70".into(),
                field: "VALOR".into(),
                directive: "3v2".into(),
                digits: 5,
            }
        );
        assert!(format("-12.5", &decimal("2v2")).is_err());
    }
}
