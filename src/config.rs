//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::ValidationError;
use crate::locale::Locale;
use crate::logo::{LogoTable, DEFAULT_ASSET_BASE};

/// Directory holding `<collection>.json` exports.
pub const DATA_DIR_ENV: &str = "KCONTENT_DATA_DIR";
/// Prefix for static logo asset paths.
pub const ASSET_BASE_ENV: &str = "KCONTENT_ASSET_BASE";
/// Locale used when a request does not specify one.
pub const LOCALE_ENV: &str = "KCONTENT_LOCALE";
/// Optional JSON file replacing the built-in logo table.
pub const LOGO_TABLE_ENV: &str = "KCONTENT_LOGO_TABLE";

const DEFAULT_DATA_DIR: &str = "./data";

/// Runtime configuration for the lookup layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Directory for [`crate::storage::JsonDirStore`].
    pub data_dir: PathBuf,
    /// Prefix for static logo asset paths.
    pub asset_base: String,
    /// Locale used when a request does not specify one.
    pub default_locale: Locale,
    /// Logo table file; `None` means the built-in table.
    pub logo_table: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            asset_base: DEFAULT_ASSET_BASE.to_string(),
            default_locale: Locale::En,
            logo_table: None,
        }
    }
}

impl LookupConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] for a value that is set but invalid.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for unset keys.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] for a value that is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                info!("{key} not set, using default");
            }
            value
        };

        let data_dir = var(DATA_DIR_ENV).map_or(defaults.data_dir, PathBuf::from);
        let asset_base = var(ASSET_BASE_ENV).unwrap_or(defaults.asset_base);
        let default_locale = match var(LOCALE_ENV) {
            Some(raw) => raw.parse::<Locale>().map_err(|e| {
                warn!("Invalid {LOCALE_ENV} value: {e}");
                ValidationError::InvalidConfig {
                    key: LOCALE_ENV.to_string(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.default_locale,
        };
        let logo_table = var(LOGO_TABLE_ENV).map(PathBuf::from);

        if !asset_base.starts_with('/') && !asset_base.contains("://") {
            warn!("{ASSET_BASE_ENV} is neither absolute nor a URL: {asset_base}");
            return Err(ValidationError::InvalidConfig {
                key: ASSET_BASE_ENV.to_string(),
                reason: format!("'{asset_base}' must start with '/' or be a URL"),
            });
        }

        Ok(Self {
            data_dir,
            asset_base,
            default_locale,
            logo_table,
        })
    }

    /// Loads the configured logo table, or the built-in one.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidConfig`] if the configured file is unreadable.
    pub fn load_logo_table(&self) -> Result<LogoTable, ValidationError> {
        match &self.logo_table {
            Some(path) => LogoTable::from_path(path),
            None => Ok(LogoTable::builtin().clone()),
        }
    }
}
