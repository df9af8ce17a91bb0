//! Numeric format directives.
//!
//! Catalogs spell a field's formatting rule as a short string:
//!
//! | Directive     | Meaning                                                   |
//! |---------------|-----------------------------------------------------------|
//! | *(empty)*     | value passes through unchanged                            |
//! | `totalNumber` | cast to a number, zero-left-padded, no decimal point       |
//! | `aliquota`    | tax rate, zero-left-padded                                 |
//! | `empty`       | right-padded with spaces                                   |
//! | `13v2`        | at most 13 integer digits, exactly 2 decimal places        |
//! | `10v2-4`      | at most 10 integer digits, between 2 and 4 decimal places  |
//!
//! The string form is parsed once into [`FormatDirective`] so the formatter
//! never re-splits it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// Formatting rule applied to a field before it is padded to its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatDirective {
    /// No formatting; the value is only transliterated to ASCII.
    #[default]
    None,
    /// Monetary or quantity total expressed in its smallest unit.
    TotalNumber,
    /// Tax rate. Shares the total-number padding today.
    Aliquota,
    /// Conditionally blank content, right-padded with spaces.
    Empty,
    /// Decimal value rendered with a comma separator.
    Decimal(DecimalFormat),
}

impl FormatDirective {
    /// Returns the catalog spelling of the directive.
    pub fn as_str(&self) -> std::borrow::Cow<'static, str> {
        match self {
            FormatDirective::None => "".into(),
            FormatDirective::TotalNumber => "totalNumber".into(),
            FormatDirective::Aliquota => "aliquota".into(),
            FormatDirective::Empty => "empty".into(),
            FormatDirective::Decimal(format) => format.to_string().into(),
        }
    }

    /// Returns true when blank input should stay blank instead of becoming `0`.
    pub fn keeps_blank(&self) -> bool {
        matches!(self, FormatDirective::Empty)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FormatDirective::None)
    }
}

impl fmt::Display for FormatDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl FromStr for FormatDirective {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(FormatDirective::None);
        }
        if trimmed.eq_ignore_ascii_case("totalNumber") {
            return Ok(FormatDirective::TotalNumber);
        }
        if trimmed.eq_ignore_ascii_case("aliquota") {
            return Ok(FormatDirective::Aliquota);
        }
        if trimmed.eq_ignore_ascii_case("empty") {
            return Ok(FormatDirective::Empty);
        }
        trimmed.parse().map(FormatDirective::Decimal)
    }
}

impl TryFrom<String> for FormatDirective {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatDirective> for String {
    fn from(value: FormatDirective) -> Self {
        value.as_str().into_owned()
    }
}

/// Parsed `"<intDigits>v<decSpec>"` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalFormat {
    /// Maximum number of characters allowed left of the decimal separator.
    pub int_digits: usize,
    pub places: DecimalPlaces,
}

impl DecimalFormat {
    pub fn fixed(int_digits: usize, places: usize) -> Self {
        Self {
            int_digits,
            places: DecimalPlaces::Fixed(places),
        }
    }

    pub fn range(int_digits: usize, min: usize, max: usize) -> Self {
        Self {
            int_digits,
            places: DecimalPlaces::Range { min, max },
        }
    }
}

impl fmt::Display for DecimalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.int_digits, self.places)
    }
}

impl FromStr for DecimalFormat {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, dec_part) = s
            .split_once('v')
            .ok_or_else(|| SchemaError::invalid_directive(s, "expected <digits>v<decimals>"))?;
        let int_digits = parse_count(s, int_part)?;
        let places = match dec_part.split_once('-') {
            Some((min, max)) => {
                let min = parse_count(s, min)?;
                let max = parse_count(s, max)?;
                if min > max {
                    return Err(SchemaError::invalid_directive(
                        s,
                        format!("decimal range {min}-{max} is inverted"),
                    ));
                }
                DecimalPlaces::Range { min, max }
            }
            None => DecimalPlaces::Fixed(parse_count(s, dec_part)?),
        };
        Ok(Self { int_digits, places })
    }
}

fn parse_count(directive: &str, part: &str) -> Result<usize, SchemaError> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchemaError::invalid_directive(
            directive,
            format!("'{part}' is not a digit count"),
        ));
    }
    part.parse()
        .map_err(|_| SchemaError::invalid_directive(directive, format!("'{part}' is too large")))
}

/// Decimal-place policy of a [`DecimalFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalPlaces {
    /// Always render exactly this many decimal places.
    Fixed(usize),
    /// Keep the supplied precision when it falls within `min..=max`,
    /// otherwise pad up to `min` or round down to `max`.
    Range { min: usize, max: usize },
}

impl DecimalPlaces {
    /// Number of decimal places to render for a value that carries `actual`
    /// fractional digits.
    pub fn resolve(&self, actual: usize) -> usize {
        match *self {
            DecimalPlaces::Fixed(places) => places,
            DecimalPlaces::Range { min, max } => actual.clamp(min, max),
        }
    }
}

impl fmt::Display for DecimalPlaces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalPlaces::Fixed(places) => write!(f, "{places}"),
            DecimalPlaces::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}
