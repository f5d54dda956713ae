// ABOUTME: Locale-aware formatting service used by operators and final string coercion
// ABOUTME: Defines the LocaleFormatter trait and built-in locale presets

mod numbers;
mod pattern;
mod spellout;
mod text;

use std::fmt;

use crate::template::error::{Result, TemplateError};
use crate::template::value::Number;

/// Presentation styles understood by [`LocaleFormatter::format_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    Decimal,
    NoLocale,
    Currency,
    Percent,
    Scientific,
    SpellOut,
    FileBytes,
    MemoryBytes,
    DecimalBytes,
    BinaryBytes,
}

impl NumberStyle {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let style = match keyword {
            "decimal" | "dec" => NumberStyle::Decimal,
            "noloc" => NumberStyle::NoLocale,
            "currency" | "cur" => NumberStyle::Currency,
            "percent" | "pct" => NumberStyle::Percent,
            "scientific" | "sci" => NumberStyle::Scientific,
            "spellout" => NumberStyle::SpellOut,
            "filebytes" | "file" | "bytes" => NumberStyle::FileBytes,
            "memorybytes" | "memory" => NumberStyle::MemoryBytes,
            "decimalbytes" => NumberStyle::DecimalBytes,
            "binarybytes" => NumberStyle::BinaryBytes,
            _ => return None,
        };
        Some(style)
    }
}

/// Which foldings `fold` applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldOptions {
    pub case: bool,
    pub width: bool,
    pub diacritics: bool,
}

impl FoldOptions {
    /// Parse a comma-separated option list, returning unrecognised names.
    pub fn parse(list: &str) -> (Self, Vec<&str>) {
        let mut options = Self::default();
        let mut unknown = Vec::new();
        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            match name {
                "case" => options.case = true,
                "width" => options.width = true,
                "diacritics" => options.diacritics = true,
                other => unknown.push(other),
            }
        }
        (options, unknown)
    }
}

/// Locale services the engine consumes.
///
/// `None` from a formatting method means the value cannot be presented
/// in that style; operators turn it into a pipeline failure.
pub trait LocaleFormatter: fmt::Debug + Send + Sync {
    fn tag(&self) -> &str;

    fn format_number(&self, number: Number, style: NumberStyle) -> Option<String>;

    fn format_pattern(&self, number: Number, pattern: &str) -> Option<String>;

    fn uppercase(&self, text: &str) -> String;

    fn lowercase(&self, text: &str) -> String;

    fn capitalize(&self, text: &str) -> String;

    fn fold(&self, text: &str, options: FoldOptions) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    decimal_separator: char,
    grouping_separator: Option<char>,
    currency_symbol: String,
    currency_placement: SymbolPlacement,
    spaced_percent: bool,
    turkic_casing: bool,
}

impl Locale {
    fn preset(
        tag: &str,
        decimal_separator: char,
        grouping_separator: Option<char>,
        currency_symbol: &str,
        currency_placement: SymbolPlacement,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
            currency_symbol: currency_symbol.to_string(),
            currency_placement,
            spaced_percent: currency_placement == SymbolPlacement::Suffix,
            turkic_casing: false,
        }
    }

    /// Locale-independent conventions
    pub fn invariant() -> Self {
        Self::preset("und", '.', None, "¤", SymbolPlacement::Prefix)
    }

    pub fn en_us() -> Self {
        Self::preset("en-US", '.', Some(','), "$", SymbolPlacement::Prefix)
    }

    pub fn en_gb() -> Self {
        Self::preset("en-GB", '.', Some(','), "£", SymbolPlacement::Prefix)
    }

    pub fn de_de() -> Self {
        Self::preset("de-DE", ',', Some('.'), "€", SymbolPlacement::Suffix)
    }

    pub fn fr_fr() -> Self {
        Self::preset("fr-FR", ',', Some('\u{202F}'), "€", SymbolPlacement::Suffix)
    }

    pub fn es_es() -> Self {
        Self::preset("es-ES", ',', Some('.'), "€", SymbolPlacement::Suffix)
    }

    pub fn tr_tr() -> Self {
        Self {
            turkic_casing: true,
            spaced_percent: false,
            ..Self::preset("tr-TR", ',', Some('.'), "₺", SymbolPlacement::Prefix)
        }
    }

    pub fn az_az() -> Self {
        Self {
            turkic_casing: true,
            ..Self::preset("az-AZ", ',', Some('.'), "₼", SymbolPlacement::Suffix)
        }
    }

    /// Resolve a BCP 47 style tag such as `de-DE`, `de_DE` or `de`
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        let mut subtags = normalized.split('-');
        let language = subtags.next().unwrap_or_default();
        let region = subtags.next();

        let locale = match (language, region) {
            ("en", Some("gb")) => Self::en_gb(),
            ("en", _) => Self::en_us(),
            ("de", _) => Self::de_de(),
            ("fr", _) => Self::fr_fr(),
            ("es", _) => Self::es_es(),
            ("tr", _) => Self::tr_tr(),
            ("az", _) => Self::az_az(),
            ("und" | "invariant" | "c" | "posix", _) => Self::invariant(),
            _ => return Err(TemplateError::UnknownLocale(tag.to_string())),
        };
        Ok(locale)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn grouping_separator(&self) -> Option<char> {
        self.grouping_separator
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl LocaleFormatter for Locale {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn format_number(&self, number: Number, style: NumberStyle) -> Option<String> {
        numbers::format_number(self, number, style)
    }

    fn format_pattern(&self, number: Number, pattern: &str) -> Option<String> {
        pattern::format_pattern(self, number, pattern)
    }

    fn uppercase(&self, text: &str) -> String {
        text::uppercase(text, self.turkic_casing)
    }

    fn lowercase(&self, text: &str) -> String {
        text::lowercase(text, self.turkic_casing)
    }

    fn capitalize(&self, text: &str) -> String {
        text::capitalize(text, self.turkic_casing)
    }

    fn fold(&self, text: &str, options: FoldOptions) -> String {
        text::fold(text, options, self.turkic_casing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_variants() {
        assert_eq!(Locale::from_tag("de_DE").unwrap().tag(), "de-DE");
        assert_eq!(Locale::from_tag("en").unwrap().tag(), "en-US");
        assert_eq!(Locale::from_tag("en-GB").unwrap().tag(), "en-GB");
        assert_eq!(Locale::from_tag("TR").unwrap().tag(), "tr-TR");
        assert!(matches!(
            Locale::from_tag("xx-YY"),
            Err(TemplateError::UnknownLocale(_))
        ));
    }

    #[test]
    fn test_style_keywords() {
        assert_eq!(NumberStyle::from_keyword("cur"), Some(NumberStyle::Currency));
        assert_eq!(NumberStyle::from_keyword("bytes"), Some(NumberStyle::FileBytes));
        assert_eq!(NumberStyle::from_keyword("memory"), Some(NumberStyle::MemoryBytes));
        assert_eq!(NumberStyle::from_keyword("#,##0"), None);
    }

    #[test]
    fn test_fold_options_parse() {
        let (options, unknown) = FoldOptions::parse("case, diacritics,shape");
        assert!(options.case);
        assert!(options.diacritics);
        assert!(!options.width);
        assert_eq!(unknown, vec!["shape"]);
    }
}
