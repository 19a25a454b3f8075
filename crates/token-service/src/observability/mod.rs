//! Observability module for the token service
//!
//! # Privacy by Default
//!
//! Instrumented functions use `#[instrument(skip_all)]` and record only
//! allow-listed fields:
//! - **SAFE**: status labels, error categories, durations
//! - **HASHED**: subject identifiers, via [`hash_for_correlation`]
//! - **NEVER**: the signing secret and issued tokens

pub mod metrics;

use crate::errors::TiError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Lets operators follow one subject across log lines without the
/// identifier itself appearing in plaintext.
pub fn hash_for_correlation(value: &str) -> String {
    let result = Sha256::digest(value.as_bytes());
    // 4 bytes = 8 hex chars
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller sent an unusable request
    Client,
    /// Signing or verification failed
    Cryptographic,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Client => "client",
            ErrorCategory::Cryptographic => "cryptographic",
        }
    }
}

impl From<&TiError> for ErrorCategory {
    fn from(err: &TiError) -> Self {
        match err {
            TiError::MissingIdentifier => ErrorCategory::Client,
            TiError::Signing(_) | TiError::InvalidToken(_) => ErrorCategory::Cryptographic,
        }
    }
}
