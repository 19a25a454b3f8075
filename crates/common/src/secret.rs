//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Use these types
//! for the HMAC signing secret and anything else that must never show up in
//! logs or `Debug` output.
//!
//! `SecretBox<T>` implements `Debug` with redaction, so any struct deriving
//! `Debug` that holds one is safe to log. Secrets are zeroized
//! on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretBox};
//!
//! #[derive(Debug)]
//! struct SigningSettings {
//!     algorithm: &'static str,
//!     key: SecretBox<Vec<u8>>, // Debug shows "[REDACTED]"
//! }
//!
//! let settings = SigningSettings {
//!     algorithm: "HS256",
//!     key: SecretBox::new(Box::new(b"token_hmac_secret_key".to_vec())),
//! };
//!
//! println!("{:?}", settings);
//!
//! // Reading the key requires an explicit call
//! let key: &[u8] = settings.key.expose_secret();
//! assert_eq!(key.len(), 21);
//! ```

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox};
