//! Fault injection for the signing seam
//!
//! `FailingSigner` stands in for `HmacSigner` when a test needs the
//! signing step to fail.

use common::jwt::TokenClaims;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use token_service::clock::SystemClock;
use token_service::crypto::TokenSigner;
use token_service::errors::TiError;
use token_service::services::token_service::TokenIssuer;

/// Signer that always fails, counting how often it was asked to sign.
#[derive(Debug, Default)]
pub struct FailingSigner {
    attempts: AtomicUsize,
}

impl FailingSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `sign` calls so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl TokenSigner for FailingSigner {
    fn sign(&self, _claims: &TokenClaims) -> Result<String, TiError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(TiError::Signing("injected signing failure".to_string()))
    }

    fn verify(&self, _token: &str, _now: i64) -> Result<TokenClaims, TiError> {
        Err(TiError::InvalidToken(
            "The token is invalid or expired".to_string(),
        ))
    }
}

/// Issuer whose every signing attempt fails.
pub fn failing_issuer() -> (TokenIssuer, Arc<FailingSigner>) {
    let signer = Arc::new(FailingSigner::new());
    let issuer = TokenIssuer::with_parts(signer.clone(), Arc::new(SystemClock));
    (issuer, signer)
}
