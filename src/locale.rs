//! Locale handling and bilingual field selection.
//!
//! Content is authored in English with optional Korean translations. The
//! selector always produces a display string: Korean is consulted only when
//! the requested locale is exactly [`Locale::Ko`], and an empty Korean value
//! falls back to English.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::lenient;
use crate::storage::Document;

/// Suffix appended to a base field name to find its Korean variant.
pub const KO_SUFFIX: &str = "_ko";

/// Requested display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, also the default.
    #[default]
    En,
    /// Korean.
    Ko,
}

impl Locale {
    /// Two-letter tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
        }
    }

    /// Lenient conversion used at the edge of the application.
    ///
    /// Any tag whose primary subtag is `ko` (`ko`, `ko-KR`, `KO_kr`) maps to
    /// Korean; everything else, including garbage, maps to English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default();
        if primary.eq_ignore_ascii_case("ko") {
            Self::Ko
        } else {
            Self::En
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ko" => Ok(Self::Ko),
            _ => Err(ValidationError::UnknownLocale {
                value: s.to_string(),
            }),
        }
    }
}

/// Anything holding an English value and an optional Korean one.
pub trait Bilingual {
    /// English/default value. May be empty only for malformed records.
    fn english(&self) -> &str;

    /// Korean value, empty when no translation exists.
    fn korean(&self) -> &str;
}

/// A pair of parallel display strings.
///
/// Serializes as the canonical `{ name_en, name_ko }` object. On input either
/// key may be missing, `null` or mistyped, and then reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBilingualField")]
pub struct BilingualField {
    /// English value.
    #[serde(rename = "name_en")]
    pub value_en: String,
    /// Korean value, empty when untranslated.
    #[serde(rename = "name_ko")]
    pub value_ko: String,
}

impl BilingualField {
    /// Creates a field from both variants.
    #[must_use]
    pub fn new(value_en: impl Into<String>, value_ko: impl Into<String>) -> Self {
        Self {
            value_en: value_en.into(),
            value_ko: value_ko.into(),
        }
    }

    /// Creates an English-only field.
    #[must_use]
    pub fn english_only(value_en: impl Into<String>) -> Self {
        Self::new(value_en, String::new())
    }

    /// Returns true if both variants are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value_en.is_empty() && self.value_ko.is_empty()
    }

    /// Selects the display value for `locale`.
    #[must_use]
    pub fn select(&self, locale: Locale) -> String {
        select(self, locale)
    }
}

#[derive(Deserialize)]
struct RawBilingualField {
    #[serde(default, deserialize_with = "lenient")]
    name_en: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name_ko: Option<String>,
}

impl From<RawBilingualField> for BilingualField {
    fn from(raw: RawBilingualField) -> Self {
        Self::new(raw.name_en.unwrap_or_default(), raw.name_ko.unwrap_or_default())
    }
}

impl Bilingual for BilingualField {
    fn english(&self) -> &str {
        &self.value_en
    }

    fn korean(&self) -> &str {
        &self.value_ko
    }
}

/// Picks the display string for `locale`.
///
/// `Ko` yields the Korean value when non-empty, otherwise English. Every
/// other locale yields English and never reads the Korean value.
#[must_use]
pub fn select<B: Bilingual + ?Sized>(field: &B, locale: Locale) -> String {
    pick(locale, || field.english(), || field.korean()).to_string()
}

/// Same rule as [`select`], applied to `document[base]` / `document[base + "_ko"]`.
///
/// Non-string values count as empty.
#[must_use]
pub fn select_by_field_name(document: &Document, base: &str, locale: Locale) -> String {
    let english = || document.get(base).and_then(|v| v.as_str()).unwrap_or_default();
    let korean = || {
        document
            .get(&format!("{base}{KO_SUFFIX}"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    };
    pick(locale, english, korean).to_string()
}

fn pick<'a>(
    locale: Locale,
    english: impl FnOnce() -> &'a str,
    korean: impl FnOnce() -> &'a str,
) -> &'a str {
    if locale == Locale::Ko {
        let ko = korean();
        if !ko.is_empty() {
            return ko;
        }
    }
    english()
}
