//! ASCII transliteration of free text.
//!
//! SINTEGRA files are plain ASCII. Free-text values go through an
//! [`AsciiNormalizer`] before they are padded; the default
//! [`Transliterator`] strips diacritics (`"Ação"` → `"Acao"`) and drops
//! anything that still is not printable ASCII.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Converts text to the ASCII character set of the output file.
pub trait AsciiNormalizer: Send + Sync {
    fn to_ascii(&self, input: &str) -> String;
}

/// Default normalizer: NFKD decomposition, combining marks removed,
/// remaining non-ASCII and control characters dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transliterator;

impl AsciiNormalizer for Transliterator {
    fn to_ascii(&self, input: &str) -> String {
        if input.bytes().all(|b| b.is_ascii() && !b.is_ascii_control()) {
            return input.to_string();
        }
        input
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| c.is_ascii() && !c.is_ascii_control())
            .collect()
    }
}

impl<F> AsciiNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn to_ascii(&self, input: &str) -> String {
        self(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        let t = Transliterator;
        assert_eq!(t.to_ascii("Ação São João"), "Acao Sao Joao");
        assert_eq!(t.to_ascii("AÇÚCAR Nº 1"), "ACUCAR No 1");
    }

    #[test]
    fn drops_untransliterable_characters() {
        let t = Transliterator;
        assert_eq!(t.to_ascii("caf\u{e9}\u{2603}\t"), "cafe");
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(Transliterator.to_ascii("RUA A, 12"), "RUA A, 12");
    }

    #[test]
    fn closures_are_normalizers() {
        let upper = |s: &str| s.replace('x', "y");
        assert_eq!(upper.to_ascii("xx"), "yy");
    }
}
