//! # kcontent - Localized content lookup
//!
//! kcontent is the lookup layer behind the site's K-culture travel pages. It
//! turns free-text names into canonical records and picks the right language
//! to show them in.
//!
//! ## Core Concepts
//!
//! - **Category**: K-pop artists, K-beauty places, K-food brands,
//!   K-festivals, points of interest, and travel packages
//! - **NameResolver**: case-insensitive, anchored, literal name lookup
//!   against the document store
//! - **Locale selection**: English by default, Korean when requested and present
//! - **LogoMapper**: normalized-key lookup of static logo assets
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kcontent::{Category, InMemoryDocumentStore, Locale, LogoMapper, NameResolver};
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let resolver = NameResolver::new(store);
//!
//! if let Some(record) = resolver.find_by_name(Category::Kpop, "ive")? {
//!     let name = record.name.select(Locale::Ko);
//!     let logo = LogoMapper::builtin().resolve_logo_asset_path(&record.name.value_en);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod category;
pub mod config;
pub mod error;
pub mod locale;
pub mod logo;
pub mod query;
pub mod record;
pub mod resolver;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use category::Category;
pub use config::LookupConfig;
pub use error::{DecodeError, LookupError, LookupResult, ValidationError};
pub use locale::{select, select_by_field_name, Bilingual, BilingualField, Locale};
pub use logo::{initials, normalize_key, LogoMapper, LogoTable};
pub use query::{ContentQuery, DisplayCard, QueryOutcome};
pub use record::{ContentRecord, RecordDetails, SocialLinks};
pub use resolver::NameResolver;
pub use storage::{
    Document, DocumentStore, InMemoryDocumentStore, JsonDirStore, NameFilter, StorageError,
};
