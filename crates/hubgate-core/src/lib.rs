//! hubgate core: credential handling, upstream request/outcome types, and the
//! shared error surface.
//!
//! This crate carries no HTTP or runtime dependencies so the gateway binaries
//! and their tests can share the same contracts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `GatewayError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod credential;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{GatewayError, Result, UpstreamError};
pub use credential::Credential;
