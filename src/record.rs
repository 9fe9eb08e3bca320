//! Canonical content records and the store-decoding boundary.
//!
//! Stored documents come in two name shapes: the current bilingual object
//! `{ "name_en": .., "name_ko": .. }` and an older plain string. Both are
//! decoded once, here, into [`BilingualField`]; nothing downstream branches
//! on the stored shape. Fields this layer does not model are ignored.
//!
//! Only `name` can fail a decode. Every other attribute is passthrough: a
//! missing, `null` or mistyped value decodes as absent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::category::Category;
use crate::error::DecodeError;
use crate::locale::BilingualField;
use crate::storage::Document;

/// Social profile links. All optional, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    /// Instagram profile URL.
    #[serde(deserialize_with = "lenient")]
    pub instagram: Option<String>,
    /// YouTube channel URL.
    #[serde(deserialize_with = "lenient")]
    pub youtube: Option<String>,
    /// X/Twitter profile URL.
    #[serde(deserialize_with = "lenient")]
    pub twitter: Option<String>,
    /// TikTok profile URL.
    #[serde(deserialize_with = "lenient")]
    pub tiktok: Option<String>,
    /// Official website.
    #[serde(deserialize_with = "lenient")]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Returns true if no link is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instagram.is_none()
            && self.youtube.is_none()
            && self.twitter.is_none()
            && self.tiktok.is_none()
            && self.website.is_none()
    }
}

/// Category-specific attributes.
///
/// Localized attributes serialize as `{ "en": .., "ko": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordDetails {
    /// K-pop artist or group.
    Kpop {
        /// Management agency.
        agency: Option<String>,
        /// Year of debut.
        debut_year: Option<u16>,
        /// Social links.
        social: SocialLinks,
    },
    /// K-beauty shop or clinic.
    Kbeauty {
        /// Street address.
        #[serde(serialize_with = "localized")]
        address: BilingualField,
        /// Official website.
        website: Option<String>,
        /// Social links.
        social: SocialLinks,
    },
    /// K-food brand.
    Kfood {
        /// Official website.
        website: Option<String>,
        /// Social links.
        social: SocialLinks,
    },
    /// K-festival venue.
    Kfestival {
        /// Venue or area.
        #[serde(serialize_with = "localized")]
        location: BilingualField,
        /// First day.
        start_date: Option<NaiveDate>,
        /// Last day.
        end_date: Option<NaiveDate>,
    },
    /// Point of interest.
    Poi {
        /// Short description.
        #[serde(serialize_with = "localized")]
        description: BilingualField,
        /// Street address.
        #[serde(serialize_with = "localized")]
        address: BilingualField,
        /// WGS84 latitude.
        latitude: Option<f64>,
        /// WGS84 longitude.
        longitude: Option<f64>,
    },
    /// Travel package.
    Package {
        /// Short description.
        #[serde(serialize_with = "localized")]
        description: BilingualField,
        /// Listed price.
        price: Option<f64>,
        /// ISO currency code.
        currency: Option<String>,
        /// Trip length in days.
        duration_days: Option<u32>,
    },
}

/// The canonical, decoded shape of a stored content document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    /// Store identifier, if the document carried one.
    pub id: Option<String>,
    /// Category the record was read from.
    pub category: Category,
    /// Display name in both languages.
    pub name: BilingualField,
    /// Stored logo URL, opaque.
    pub logo_url: Option<String>,
    /// Stored background image URL, opaque.
    pub background_url: Option<String>,
    /// Last admin update, when recorded and parseable.
    pub updated_at: Option<DateTime<Utc>>,
    /// Category-specific attributes.
    pub details: RecordDetails,
}

impl ContentRecord {
    /// Decodes a stored document of `category`.
    ///
    /// # Errors
    /// Returns [`DecodeError`] naming `name` when the name is missing or is
    /// neither a string nor an object.
    pub fn from_document(category: Category, document: &Document) -> Result<Self, DecodeError> {
        let collection = category.collection();
        let Some(raw_name) = document.get("name") else {
            return Err(DecodeError::new(collection, "name", "missing field"));
        };
        let name = NameField::deserialize(raw_name)
            .map_err(|e| DecodeError::new(collection, "name", e.to_string()))?;

        let common: RawCommon = decode(collection, document)?;
        let details = match category {
            Category::Kpop => {
                let raw: RawKpop = decode(collection, document)?;
                RecordDetails::Kpop {
                    agency: raw.agency,
                    debut_year: raw.debut_year,
                    social: raw.social.unwrap_or_default(),
                }
            }
            Category::Kbeauty => {
                let raw: RawKbeauty = decode(collection, document)?;
                RecordDetails::Kbeauty {
                    address: flat(raw.address, raw.address_ko),
                    website: raw.website,
                    social: raw.social.unwrap_or_default(),
                }
            }
            Category::Kfood => {
                let raw: RawKfood = decode(collection, document)?;
                RecordDetails::Kfood {
                    website: raw.website,
                    social: raw.social.unwrap_or_default(),
                }
            }
            Category::Kfestival => {
                let raw: RawKfestival = decode(collection, document)?;
                RecordDetails::Kfestival {
                    location: flat(raw.location, raw.location_ko),
                    start_date: raw.start_date,
                    end_date: raw.end_date,
                }
            }
            Category::Poi => {
                let raw: RawPoi = decode(collection, document)?;
                RecordDetails::Poi {
                    description: flat(raw.description, raw.description_ko),
                    address: flat(raw.address, raw.address_ko),
                    latitude: raw.latitude,
                    longitude: raw.longitude,
                }
            }
            Category::Package => {
                let raw: RawPackage = decode(collection, document)?;
                RecordDetails::Package {
                    description: flat(raw.description, raw.description_ko),
                    price: raw.price,
                    currency: raw.currency,
                    duration_days: raw.duration_days,
                }
            }
        };

        Ok(Self {
            id: common.id.map(RawId::into_string),
            category,
            name: name.into_canonical(category, common.name_ko),
            logo_url: common.logo_url,
            background_url: common.background_url,
            updated_at: common.updated_at.and_then(RawDate::parse),
            details,
        })
    }

    /// Localized description, for categories that carry one.
    #[must_use]
    pub fn description(&self) -> Option<&BilingualField> {
        match &self.details {
            RecordDetails::Poi { description, .. } | RecordDetails::Package { description, .. } => {
                Some(description)
            }
            _ => None,
        }
    }

    /// Localized address or venue, for categories that carry one.
    #[must_use]
    pub fn place(&self) -> Option<&BilingualField> {
        match &self.details {
            RecordDetails::Kbeauty { address, .. } | RecordDetails::Poi { address, .. } => {
                Some(address)
            }
            RecordDetails::Kfestival { location, .. } => Some(location),
            _ => None,
        }
    }
}

fn decode<T: DeserializeOwned>(collection: &str, document: &Document) -> Result<T, DecodeError> {
    serde_json::from_value(Value::Object(document.clone()))
        .map_err(|e| DecodeError::new(collection, "<document>", e.to_string()))
}

fn flat(en: Option<String>, ko: Option<String>) -> BilingualField {
    BilingualField::new(en.unwrap_or_default(), ko.unwrap_or_default())
}

/// Decodes an optional attribute, mapping `null` and mistyped values to `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn localized<S: Serializer>(field: &BilingualField, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2))?;
    map.serialize_entry("en", &field.value_en)?;
    map.serialize_entry("ko", &field.value_ko)?;
    map.end()
}

/// Stored name: current bilingual object, or a pre-migration string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameField {
    Legacy(String),
    Bilingual(BilingualField),
}

impl NameField {
    /// A legacy string is the English variant. Its Korean variant is empty,
    /// except in the flat-name categories where a sibling `name_ko` is part
    /// of the stored shape.
    fn into_canonical(self, category: Category, sibling_ko: Option<String>) -> BilingualField {
        match self {
            Self::Legacy(en) if category.has_bilingual_name() => BilingualField::english_only(en),
            Self::Legacy(en) => BilingualField::new(en, sibling_ko.unwrap_or_default()),
            Self::Bilingual(field) => field,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Plain(String),
    Number(i64),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Plain(s) | Self::Extended { oid: s } => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    Plain(String),
    Extended {
        #[serde(rename = "$date")]
        date: String,
    },
    // Anything else is not a timestamp this layer understands.
    Other(Value),
}

impl RawDate {
    fn parse(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Plain(s) | Self::Extended { date: s } => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCommon {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    id: Option<RawId>,
    #[serde(rename = "name_ko", default, deserialize_with = "lenient")]
    name_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    logo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    background_url: Option<String>,
    updated_at: Option<RawDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKpop {
    #[serde(default, deserialize_with = "lenient")]
    agency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    debut_year: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    social: Option<SocialLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKbeauty {
    #[serde(default, deserialize_with = "lenient")]
    address: Option<String>,
    #[serde(rename = "address_ko", default, deserialize_with = "lenient")]
    address_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    website: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    social: Option<SocialLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKfood {
    #[serde(default, deserialize_with = "lenient")]
    website: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    social: Option<SocialLinks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKfestival {
    #[serde(default, deserialize_with = "lenient")]
    location: Option<String>,
    #[serde(rename = "location_ko", default, deserialize_with = "lenient")]
    location_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPoi {
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(rename = "description_ko", default, deserialize_with = "lenient")]
    description_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    address: Option<String>,
    #[serde(rename = "address_ko", default, deserialize_with = "lenient")]
    address_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackage {
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(rename = "description_ko", default, deserialize_with = "lenient")]
    description_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    duration_days: Option<u32>,
}
