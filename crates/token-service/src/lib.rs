//! Token Service Library
//!
//! Issues short-lived HS256 connection tokens for a single subject
//! identifier over `GET /token`.
//!
//! # Modules
//!
//! - `clock` - Injectable time source
//! - `config` - Service configuration
//! - `crypto` - JWT signing and verification
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - Response models
//! - `observability` - Metrics and log correlation helpers
//! - `routes` - Router construction
//! - `services` - Token issuance

pub mod clock;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
