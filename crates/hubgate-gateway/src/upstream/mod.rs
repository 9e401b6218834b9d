//! Upstream API client.
//!
//! Wraps a pooled `reqwest::Client` and folds every call into an
//! `UpstreamOutcome`, so handlers never see a transport error type.

pub mod client;

pub use client::UpstreamClient;
