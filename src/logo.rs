//! Static logo lookup.
//!
//! Free-text labels ("Stray Kids", " AESPA ", "G-Dragon") are normalized
//! into a fixed key and looked up in an immutable table of asset
//! filenames. The document store is never consulted.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use tracing::warn;

use crate::error::ValidationError;

/// Default prefix for asset-serving paths.
pub const DEFAULT_ASSET_BASE: &str = "/api/logos";

/// Placeholder initials for a blank label.
pub const INITIALS_PLACEHOLDER: &str = "?";

static BUILTIN_TABLE: LazyLock<LogoTable> = LazyLock::new(|| {
    LogoTable::from_json_str(include_str!("../assets/logo_table.json"))
        .expect("built-in logo table must be a valid JSON object of strings")
});

/// Lowercases, trims, and drops every character outside `[a-z0-9]`.
///
/// # Examples
///
/// ```
/// use kcontent::logo::normalize_key;
///
/// assert_eq!(normalize_key("  Stray Kids "), "straykids");
/// assert_eq!(normalize_key("(G)I-DLE"), "gidle");
/// assert_eq!(normalize_key("!!!"), "");
/// ```
#[must_use]
pub fn normalize_key(input: &str) -> String {
    input
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Fallback badge text when no logo asset exists.
///
/// Takes the first alphanumeric character of each of the first two words,
/// uppercased. Leading punctuation inside a word is skipped, so `"(G)I-DLE"`
/// gives `"G"` rather than `"("`, and digits count: `"NCT 127"` gives `"N1"`.
/// A blank label yields `"?"`. When no word holds an alphanumeric character
/// the first character of the trimmed label is used, so `"!!! ???"` gives `"!"`.
#[must_use]
pub fn initials(label: &str) -> String {
    let trimmed = label.trim();
    let Some(first) = trimmed.chars().next() else {
        return INITIALS_PLACEHOLDER.to_string();
    };

    let letters: String = trimmed
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        first.to_uppercase().collect()
    } else {
        letters
    }
}

/// Immutable map of normalized key to asset filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoTable {
    entries: HashMap<String, String>,
}

impl LogoTable {
    /// The table compiled into the crate.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_TABLE
    }

    /// Builds a table from `(label, filename)` pairs, normalizing every label.
    ///
    /// When two labels normalize to the same key the later pair wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = HashMap::new();
        for (label, filename) in pairs {
            let key = normalize_key(label.as_ref());
            if key.is_empty() {
                warn!(label = label.as_ref(), "logo table label normalizes to an empty key; skipped");
                continue;
            }
            let filename = filename.into();
            if let Some(previous) = entries.insert(key.clone(), filename.clone()) {
                if previous != filename {
                    warn!(%key, %previous, %filename, "duplicate logo table key; later entry wins");
                }
            }
        }
        Self { entries }
    }

    /// Parses a JSON object of `label -> filename`.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] when the text is not a JSON
    /// object of strings.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig {
                key: "logo_table".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_pairs(raw))
    }

    /// Loads a JSON table from disk.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ValidationError::InvalidConfig {
            key: "logo_table".to_string(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&json)
    }

    /// Exact lookup by an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps labels to logo filenames and asset paths using an injected table.
#[derive(Debug, Clone)]
pub struct LogoMapper<'t> {
    table: &'t LogoTable,
    asset_base: String,
}

impl LogoMapper<'static> {
    /// Mapper over the built-in table with the default asset base.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(LogoTable::builtin())
    }
}

impl<'t> LogoMapper<'t> {
    /// Creates a mapper over `table` with the default asset base.
    #[must_use]
    pub fn new(table: &'t LogoTable) -> Self {
        Self {
            table,
            asset_base: DEFAULT_ASSET_BASE.to_string(),
        }
    }

    /// Overrides the prefix used by [`Self::resolve_logo_asset_path`].
    #[must_use]
    pub fn with_asset_base(mut self, asset_base: impl Into<String>) -> Self {
        self.asset_base = asset_base.into();
        self
    }

    /// The table this mapper reads.
    #[must_use]
    pub const fn table(&self) -> &'t LogoTable {
        self.table
    }

    /// Filename for `label`, by exact normalized-key equality.
    #[must_use]
    pub fn resolve_logo_filename(&self, label: &str) -> Option<&'t str> {
        self.table.get(&normalize_key(label))
    }

    /// Asset-serving path embedding the percent-encoded filename.
    #[must_use]
    pub fn resolve_logo_asset_path(&self, label: &str) -> Option<String> {
        let filename = self.resolve_logo_filename(label)?;
        Some(format!(
            "{}/{}",
            self.asset_base.trim_end_matches('/'),
            urlencoding::encode(filename)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key_case_and_whitespace_insensitive() {
        for s in ["aespa", "Stray Kids", "NCT 127", "G-Dragon", "아이브 IVE"] {
            let key = normalize_key(s);
            assert_eq!(key, normalize_key(&s.to_uppercase()), "upper: {s}");
            assert_eq!(key, normalize_key(&format!("  {s}  ")), "padded: {s}");
        }
    }

    #[test]
    fn test_normalize_key_non_alphanumeric_only() {
        for s in ["", "   ", "!!!", "-_-", "아이브", "♥ ♥"] {
            assert_eq!(normalize_key(s), "", "input: {s:?}");
        }
    }

    #[test]
    fn test_normalize_key_strips_punctuation() {
        assert_eq!(normalize_key("(G)I-DLE"), "gidle");
        assert_eq!(normalize_key("NCT 127"), "nct127");
        assert_eq!(normalize_key("Paris Baguette!"), "parisbaguette");
    }

    #[test]
    fn test_resolve_logo_filename_variants_agree() {
        let mapper = LogoMapper::builtin();
        let expected = mapper.resolve_logo_filename("aespa");
        assert_eq!(expected, Some("aespa_logo.svg"));
        assert_eq!(mapper.resolve_logo_filename("AESPA"), expected);
        assert_eq!(mapper.resolve_logo_filename(" aespa "), expected);
    }

    #[test]
    fn test_resolve_logo_filename_exact_only() {
        let mapper = LogoMapper::builtin();
        assert_eq!(mapper.resolve_logo_filename("ive"), Some("ive_logo.svg"));
        assert_eq!(mapper.resolve_logo_filename("iv"), None);
        assert_eq!(mapper.resolve_logo_filename("ive2"), None);
        assert_eq!(mapper.resolve_logo_filename(""), None);
    }

    #[test]
    fn test_resolve_logo_asset_path_percent_encodes() {
        let table = LogoTable::from_pairs([("Paris Baguette", "paris baguette+logo.png")]);
        let mapper = LogoMapper::new(&table).with_asset_base("/static/logos/");
        assert_eq!(
            mapper.resolve_logo_asset_path("paris baguette").as_deref(),
            Some("/static/logos/paris%20baguette%2Blogo.png")
        );
        assert_eq!(mapper.resolve_logo_asset_path("unknown"), None);
    }

    #[test]
    fn test_resolve_logo_asset_path_default_base() {
        let mapper = LogoMapper::builtin();
        assert_eq!(
            mapper.resolve_logo_asset_path("Stray Kids").as_deref(),
            Some("/api/logos/straykids_logo.svg")
        );
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("BTS"), "B");
        assert_eq!(initials("G-Dragon"), "G");
        assert_eq!(initials("Stray Kids"), "SK");
        assert_eq!(initials("Tomorrow X Together"), "TX");
        assert_eq!(initials("  le sserafim  "), "LS");
        assert_eq!(initials("(G)I-DLE"), "G");
        assert_eq!(initials("NCT 127"), "N1");
        assert_eq!(initials("아이브"), "아");
        assert_eq!(initials(""), "?");
        assert_eq!(initials("   "), "?");
        assert_eq!(initials("!!! ???"), "!");
    }

    #[test]
    fn test_table_from_pairs_normalizes_keys() {
        let table = LogoTable::from_pairs([("Red Velvet", "rv.svg"), ("   ", "blank.svg")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("redvelvet"), Some("rv.svg"));
        assert_eq!(table.get("Red Velvet"), None);
    }

    #[test]
    fn test_table_from_json_rejects_non_strings() {
        let err = LogoTable::from_json_str(r#"{"ive": 3}"#).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builtin_table_loads() {
        let table = LogoTable::builtin();
        assert!(!table.is_empty());
        assert_eq!(table.get("straykids"), Some("straykids_logo.svg"));
    }
}
