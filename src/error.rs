//! Error types for kcontent.
//!
//! Every failure is strongly typed using thiserror so callers can tell
//! "no such record" (an `Ok(None)`) apart from "the store could not answer"
//! (a [`LookupError::Store`]).

use thiserror::Error;

use crate::storage::StorageError;

/// Validation errors raised while interpreting caller-supplied parameters.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown content category '{value}'")]
    UnknownCategory {
        value: String,
    },

    #[error("Unknown locale '{value}' (expected 'en' or 'ko')")]
    UnknownLocale {
        value: String,
    },

    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig {
        key: String,
        reason: String,
    },
}

/// A stored document could not be decoded into a canonical record.
#[derive(Debug, Error)]
#[error("Cannot decode document in '{collection}' (field '{field}'): {reason}")]
pub struct DecodeError {
    /// Collection the document was read from.
    pub collection: String,
    /// Field that failed to decode, or `<document>` when the shape is wrong as a whole.
    pub field: String,
    /// Human readable cause.
    pub reason: String,
}

impl DecodeError {
    /// Creates a decode error for a specific field.
    #[must_use]
    pub fn new(
        collection: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level error type for kcontent.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Store error: {0}")]
    Store(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl LookupError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the document store could not be reached or failed the query.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a decode error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns true if retrying the same call could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Store(e) => matches!(e, StorageError::ConnectionError(_)),
            Self::Validation(_) | Self::Decode(_) | Self::Internal { .. } => false,
        }
    }
}

/// Result type alias for kcontent operations.
pub type LookupResult<T> = Result<T, LookupError>;
