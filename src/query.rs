//! Transport-agnostic query surface.
//!
//! Route handlers parse their query string into a [`ContentQuery`] and hand
//! it to [`ContentQuery::execute`]. A name filter routes to the resolver;
//! no filter means "everything in the category".

use serde::Serialize;

use crate::category::Category;
use crate::error::LookupResult;
use crate::locale::Locale;
use crate::logo::{initials, LogoMapper};
use crate::record::ContentRecord;
use crate::resolver::NameResolver;

/// Already-parsed request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    /// Category selector, e.g. `kpop` or `pois`.
    pub category: Option<String>,
    /// Free-text name filter.
    pub name: Option<String>,
}

/// Result of executing a [`ContentQuery`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// A name filter was given: zero or one record.
    One(Option<ContentRecord>),
    /// No name filter: every matching record.
    All(Vec<ContentRecord>),
}

impl QueryOutcome {
    /// Flattens the outcome into a list.
    #[must_use]
    pub fn into_records(self) -> Vec<ContentRecord> {
        match self {
            Self::One(record) => record.into_iter().collect(),
            Self::All(records) => records,
        }
    }
}

impl ContentQuery {
    /// Query for one category, optionally filtered by name.
    #[must_use]
    pub fn new(category: Option<&str>, name: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    /// Runs the query.
    ///
    /// Blank parameters count as absent.
    ///
    /// # Errors
    /// - [`crate::ValidationError::UnknownCategory`] for an unrecognized selector
    /// - any store or decode failure from the resolver
    pub fn execute(&self, resolver: &NameResolver) -> LookupResult<QueryOutcome> {
        let category = non_blank(self.category.as_deref())
            .map(str::parse::<Category>)
            .transpose()?;
        let name = non_blank(self.name.as_deref());

        match (category, name) {
            (Some(category), Some(name)) => {
                Ok(QueryOutcome::One(resolver.find_by_name(category, name)?))
            }
            (Some(category), None) => Ok(QueryOutcome::All(resolver.find_all(category)?)),
            (None, Some(name)) => Ok(QueryOutcome::One(resolver.find_by_name_in_any(name)?)),
            (None, None) => {
                let mut records = Vec::new();
                for category in Category::ALL {
                    records.extend(resolver.find_all(category)?);
                }
                Ok(QueryOutcome::All(records))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A record rendered for one locale: what a list or detail card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCard {
    /// Store identifier.
    pub id: Option<String>,
    /// Category selector.
    pub category: Category,
    /// Locale the card was rendered for.
    pub locale: Locale,
    /// Localized display name.
    pub name: String,
    /// Localized description, empty when the category has none.
    pub description: String,
    /// Localized address or venue, empty when the category has none.
    pub place: String,
    /// Logo to show: the stored URL, else the static asset path.
    pub logo: Option<String>,
    /// Badge text shown when there is no logo.
    pub initials: String,
    /// Background image URL.
    pub background: Option<String>,
}

impl DisplayCard {
    /// Renders `record` for `locale`.
    ///
    /// The static logo table is keyed by the English name, which is stable
    /// across locales.
    #[must_use]
    pub fn build(record: &ContentRecord, locale: Locale, logos: &LogoMapper<'_>) -> Self {
        let name = record.name.select(locale);
        let logo = record
            .logo_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| logos.resolve_logo_asset_path(&record.name.value_en));

        Self {
            id: record.id.clone(),
            category: record.category,
            locale,
            initials: initials(&name),
            name,
            description: record
                .description()
                .map(|d| d.select(locale))
                .unwrap_or_default(),
            place: record.place().map(|p| p.select(locale)).unwrap_or_default(),
            logo,
            background: record.background_url.clone(),
        }
    }
}
