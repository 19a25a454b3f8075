//! Deterministic secret fixtures for testing
//!
//! The same seed always yields the same secret, so tokens issued in one
//! test can be checked against a secret rebuilt elsewhere.

use common::secret::SecretBox;
use std::sync::Arc;
use token_service::clock::FixedClock;
use token_service::crypto::HmacSigner;
use token_service::services::token_service::TokenIssuer;

/// Fixed "now" used by pinned-clock fixtures (2023-11-14T22:13:20Z).
pub const TEST_NOW: i64 = 1_700_000_000;

/// Generate a deterministic 32-byte HMAC secret for testing.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(test_secret(1), test_secret(1));
/// assert_ne!(test_secret(1), test_secret(2));
/// ```
pub fn test_secret(seed: u8) -> Vec<u8> {
    (0u8..32)
        .map(|i| seed.wrapping_mul(31).wrapping_add(i.wrapping_mul(7)) ^ 0x5a)
        .collect()
}

/// Same as [`test_secret`], wrapped the way `Config` holds it.
pub fn test_secret_box(seed: u8) -> SecretBox<Vec<u8>> {
    SecretBox::new(Box::new(test_secret(seed)))
}

/// Issuer over `test_secret(seed)` with a clock pinned at `TEST_NOW`.
///
/// The clock is returned so tests can move time forward.
pub fn test_issuer(seed: u8) -> (TokenIssuer, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(TEST_NOW));
    let issuer = TokenIssuer::with_parts(
        Arc::new(HmacSigner::from_bytes(&test_secret(seed))),
        clock.clone(),
    );
    (issuer, clock)
}
