//! Common utilities and types shared across the token service crates.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for JWT utilities (claims, size limits, unverified inspection)
pub mod jwt;
