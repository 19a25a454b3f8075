use crate::errors::TiError;
use common::jwt::{TokenClaims, MAX_JWT_SIZE_BYTES};
use common::secret::{ExposeSecret, SecretBox};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use tracing::instrument;

/// Generic verification failure message. Callers never learn which check failed.
const INVALID_TOKEN_MESSAGE: &str = "The token is invalid or expired";

/// Produces and checks signed tokens.
///
/// The issuer depends on this trait rather than on HMAC directly so a
/// failing signer can be injected in fault-injection tests.
pub trait TokenSigner: Send + Sync {
    /// Sign `claims` into a compact JWS.
    fn sign(&self, claims: &TokenClaims) -> Result<String, TiError>;

    /// Verify signature and expiry of `token` at `now` (Unix seconds).
    fn verify(&self, token: &str, now: i64) -> Result<TokenClaims, TiError>;
}

/// HS256 signer holding keys derived once from the configured secret.
pub struct HmacSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl HmacSigner {
    pub fn new(secret: &SecretBox<Vec<u8>>) -> Self {
        Self::from_bytes(secret.expose_secret())
    }

    pub fn from_bytes(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &"HS256")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl TokenSigner for HmacSigner {
    fn sign(&self, claims: &TokenClaims) -> Result<String, TiError> {
        encode_claims(claims, &self.encoding_key)
    }

    fn verify(&self, token: &str, now: i64) -> Result<TokenClaims, TiError> {
        decode_claims(token, &self.decoding_key, now)
    }
}

/// Sign JWT with an HMAC-SHA256 secret
#[instrument(skip_all)]
pub fn sign_jwt(claims: &TokenClaims, secret: &[u8]) -> Result<String, TiError> {
    encode_claims(claims, &EncodingKey::from_secret(secret))
}

/// Verify JWT with an HMAC-SHA256 secret
///
/// Validates, in order:
/// - Token size (must be <= MAX_JWT_SIZE_BYTES), before any parsing
/// - Algorithm (HS256 only) and signature
/// - Expiration: rejected once `now >= exp`, no leeway
///
/// `now` comes from the caller's clock so expiry checks are deterministic.
#[instrument(skip_all)]
pub fn verify_jwt(token: &str, secret: &[u8], now: i64) -> Result<TokenClaims, TiError> {
    decode_claims(token, &DecodingKey::from_secret(secret), now)
}

fn encode_claims(claims: &TokenClaims, key: &EncodingKey) -> Result<String, TiError> {
    // Header::new sets typ to "JWT"
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, key)
        .map_err(|e| TiError::Signing(format!("JWT signing operation failed: {}", e)))
}

fn decode_claims(token: &str, key: &DecodingKey, now: i64) -> Result<TokenClaims, TiError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "ti.crypto",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(TiError::InvalidToken(INVALID_TOKEN_MESSAGE.to_string()));
    }

    // Expiry is checked below against the injected clock, not the wall clock
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let token_data = decode::<TokenClaims>(token, key, &validation).map_err(|e| {
        tracing::debug!(target: "ti.crypto", error = %e, "Token verification failed");
        TiError::InvalidToken(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    if token_data.claims.is_expired_at(now) {
        tracing::debug!(
            target: "ti.crypto",
            exp = token_data.claims.exp,
            now = now,
            "Token rejected: expired"
        );
        return Err(TiError::InvalidToken(INVALID_TOKEN_MESSAGE.to_string()));
    }

    Ok(token_data.claims)
}
