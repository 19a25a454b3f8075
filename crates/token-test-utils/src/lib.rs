//! # Token Test Utilities
//!
//! Shared test utilities for the token service.
//!
//! This crate provides:
//! - Deterministic secret fixtures and a pinned clock
//! - Fault injection signers (FailingSigner)
//! - Server test harness (TestTokenServer for E2E tests)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestTokenServer::spawn().await?;
//!     let response = server.request_token(Some("alice")).await?;
//!     let token = response.json::<serde_json::Value>().await?["token"]
//!         .as_str()
//!         .unwrap()
//!         .to_string();
//!
//!     token.assert_valid_jwt().assert_for_subject("alice");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod crypto_fixtures;
pub mod fault_injection;
pub mod server_harness;

// Re-export commonly used items
pub use assertions::*;
pub use crypto_fixtures::*;
pub use fault_injection::*;
pub use server_harness::*;
