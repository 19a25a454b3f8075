//! JWT utilities shared by the issuer and its consumers.
//!
//! This module provides:
//! - The connection token claims structure (`sub` + `exp`)
//! - Size limits applied before any parsing
//! - Unverified inspection of header and claims for clients and tests
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing
//! - Nothing in this module verifies a signature; use the issuer's
//!   verification for any trust decision
//! - The `sub` field in [`TokenClaims`] is redacted in Debug output

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// Issued tokens are around 150 bytes plus the subject. Anything larger than
/// this is rejected before base64 decoding or signature checks.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// JWS algorithm name carried in the header of every issued token.
pub const TOKEN_ALGORITHM: &str = "HS256";

/// JWS `typ` header value of every issued token.
pub const TOKEN_TYPE: &str = "JWT";

// =============================================================================
// Error Types
// =============================================================================

/// Errors returned by unverified token inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    /// Token size exceeds maximum allowed.
    #[error("The token is invalid")]
    TokenTooLarge,

    /// Token is not a three-segment compact JWS with JSON header and claims.
    #[error("The token is invalid")]
    MalformedToken,
}

// =============================================================================
// Claims Types
// =============================================================================

/// Claims carried by an issued token.
///
/// Exactly two entries: the subject identifier and the absolute expiry.
/// `sub` is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier - redacted in Debug output.
    pub sub: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

impl fmt::Debug for TokenClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenClaims")
            .field("sub", &"[REDACTED]")
            .field("exp", &self.exp)
            .finish()
    }
}

impl TokenClaims {
    /// Creates claims for `sub` expiring at `exp`.
    #[must_use]
    pub fn new(sub: impl Into<String>, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            exp,
        }
    }

    /// Returns true once `now` has reached the expiry timestamp.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Header fields relevant to issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    #[serde(default)]
    pub typ: Option<String>,
}

// =============================================================================
// Functions
// =============================================================================

/// Split a compact JWS into its three segments after the size check.
fn split_segments(token: &str) -> Result<[&str; 3], JwtError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtError::TokenTooLarge);
    }

    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(claims), Some(signature), None) => Ok([header, claims, signature]),
        _ => {
            tracing::debug!(target: "common.jwt", "Token rejected: invalid JWT format");
            Err(JwtError::MalformedToken)
        }
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, JwtError> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT segment base64");
        JwtError::MalformedToken
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT segment JSON");
        JwtError::MalformedToken
    })
}

/// Read the header of a token WITHOUT verifying the signature.
///
/// # Errors
///
/// - `TokenTooLarge` if the token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` on wrong structure, bad base64 or invalid JSON
pub fn peek_header(token: &str) -> Result<TokenHeader, JwtError> {
    let [header, _, _] = split_segments(token)?;
    decode_segment(header)
}

/// Read the claims of a token WITHOUT verifying the signature.
///
/// Clients use this to schedule reconnection before `exp`; never use the
/// result to make an authentication decision.
///
/// # Errors
///
/// - `TokenTooLarge` if the token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` on wrong structure, bad base64 or invalid JSON
pub fn peek_claims(token: &str) -> Result<TokenClaims, JwtError> {
    let [_, claims, _] = split_segments(token)?;
    decode_segment(claims)
}
