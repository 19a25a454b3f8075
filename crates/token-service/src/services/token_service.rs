use crate::clock::{Clock, SystemClock};
use crate::crypto::{HmacSigner, TokenSigner};
use crate::errors::TiError;
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_token_issuance;
use common::jwt::TokenClaims;
use common::secret::SecretBox;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

pub const TOKEN_EXPIRY_SECONDS: i64 = 3600; // 1 hour

/// Issues signed connection tokens for a subject identifier.
///
/// Holds only read-only state behind `Arc`, so one instance is shared by
/// every request without locking. Nothing issued is stored.
#[derive(Clone)]
pub struct TokenIssuer {
    signer: Arc<dyn TokenSigner>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// HS256 issuer on the wall clock.
    pub fn new(secret: &SecretBox<Vec<u8>>) -> Self {
        Self::with_parts(Arc::new(HmacSigner::new(secret)), Arc::new(SystemClock))
    }

    pub fn with_parts(signer: Arc<dyn TokenSigner>, clock: Arc<dyn Clock>) -> Self {
        Self { signer, clock }
    }

    /// Issue a token asserting `identifier`, valid for one hour from now.
    ///
    /// The identifier is opaque and is not validated here; the HTTP layer
    /// rejects empty values before calling.
    #[instrument(skip_all)]
    pub fn issue_token(&self, identifier: &str) -> Result<String, TiError> {
        let start = Instant::now();

        let now = self.clock.now_unix();
        let claims = TokenClaims::new(identifier, now.saturating_add(TOKEN_EXPIRY_SECONDS));

        let result = self.signer.sign(&claims);

        match &result {
            Ok(_) => {
                record_token_issuance("success", start.elapsed());
                tracing::debug!(
                    target: "ti.token",
                    subject_hash = %hash_for_correlation(identifier),
                    exp = claims.exp,
                    "Token issued"
                );
            }
            Err(e) => {
                record_token_issuance("error", start.elapsed());
                tracing::warn!(
                    target: "ti.token",
                    subject_hash = %hash_for_correlation(identifier),
                    error = %e,
                    "Token issuance failed"
                );
            }
        }

        result
    }

    /// Verify a token issued with the same secret, against the issuer's clock.
    #[instrument(skip_all)]
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TiError> {
        self.signer.verify(token, self.clock.now_unix())
    }
}
