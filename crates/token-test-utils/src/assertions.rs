//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for issued tokens. These only inspect
//! the token; signature checks go through `TokenIssuer::verify`.

use common::jwt::{peek_claims, peek_header, TOKEN_ALGORITHM, TOKEN_TYPE};

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("alice")
///     .assert_expires_in(3600);
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a well-formed HS256 JWT
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the token expires at exactly `exp`
    fn assert_expires_at(&self, exp: i64) -> &Self;

    /// Assert that the token expires within the specified seconds from now
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        assert_eq!(
            self.split('.').count(),
            3,
            "JWT must have 3 parts (header.payload.signature)"
        );

        let header = peek_header(self)
            .unwrap_or_else(|e| panic!("Failed to decode JWT header: {}", e));
        assert_eq!(header.alg, TOKEN_ALGORITHM, "Expected HS256 algorithm");
        assert_eq!(header.typ.as_deref(), Some(TOKEN_TYPE), "Expected JWT type");

        if let Err(e) = peek_claims(self) {
            panic!("Failed to decode JWT claims: {}", e);
        }

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = peek_claims(self).expect("Failed to decode JWT claims");

        assert_eq!(
            claims.sub, subject,
            "Token subject mismatch: expected '{}', got '{}'",
            subject, claims.sub
        );

        self
    }

    fn assert_expires_at(&self, exp: i64) -> &Self {
        let claims = peek_claims(self).expect("Failed to decode JWT claims");

        assert_eq!(claims.exp, exp, "Token expiry mismatch");

        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims = peek_claims(self).expect("Failed to decode JWT claims");
        let now = chrono::Utc::now().timestamp();
        let remaining = claims.exp - now;

        // One second of slack for a clock tick between issue and check
        assert!(
            remaining <= seconds && remaining >= seconds - 1,
            "Token should expire in ~{} seconds, but expires in {} seconds",
            seconds,
            remaining
        );

        self
    }
}
