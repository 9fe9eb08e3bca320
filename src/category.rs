//! Content categories and the collections backing them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Name fields matched for categories that store `{ name_en, name_ko }`.
///
/// The trailing flat `name` keeps records written before the bilingual
/// migration resolvable.
const BILINGUAL_NAME_FIELDS: &[&str] = &["name.name_en", "name.name_ko", "name"];

/// Name fields matched for categories that store a flat `name` / `name_ko` pair.
const FLAT_NAME_FIELDS: &[&str] = &["name", "name_ko", "name.name_en", "name.name_ko"];

/// A content category served by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// K-pop artists and groups.
    Kpop,
    /// K-beauty shops and clinics.
    Kbeauty,
    /// K-food brands.
    Kfood,
    /// K-festival venues.
    Kfestival,
    /// Points of interest.
    Poi,
    /// Travel packages.
    Package,
}

impl Category {
    /// Every category, in the order cross-category lookups try them.
    pub const ALL: [Self; 6] = [
        Self::Kpop,
        Self::Kbeauty,
        Self::Kfood,
        Self::Kfestival,
        Self::Poi,
        Self::Package,
    ];

    /// Short selector used in query strings and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kpop => "kpop",
            Self::Kbeauty => "kbeauty",
            Self::Kfood => "kfood",
            Self::Kfestival => "kfestival",
            Self::Poi => "poi",
            Self::Package => "package",
        }
    }

    /// Name of the document-store collection holding this category.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Kpop => "kpops",
            Self::Kbeauty => "kbeauties",
            Self::Kfood => "kfoods",
            Self::Kfestival => "kfestivals",
            Self::Poi => "pois",
            Self::Package => "packages",
        }
    }

    /// Returns true if the category stores names as a `{ name_en, name_ko }` object.
    #[must_use]
    pub const fn has_bilingual_name(self) -> bool {
        matches!(
            self,
            Self::Kpop | Self::Kbeauty | Self::Kfood | Self::Kfestival
        )
    }

    /// Dotted field paths a name lookup matches against, OR-combined.
    #[must_use]
    pub const fn name_fields(self) -> &'static [&'static str] {
        if self.has_bilingual_name() {
            BILINGUAL_NAME_FIELDS
        } else {
            FLAT_NAME_FIELDS
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Accepts the selector (`kpop`), the collection name (`kpops`), and
    /// the hyphenated spelling (`k-pop`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();

        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == key || c.collection() == key)
            .ok_or_else(|| ValidationError::UnknownCategory {
                value: s.to_string(),
            })
    }
}
