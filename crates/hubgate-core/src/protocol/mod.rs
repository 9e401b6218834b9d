//! Upstream wire contracts.
//!
//! Request specs carry the fixed header set and a response-shape hint; every
//! call resolves to a two-variant `UpstreamOutcome` that handlers consume
//! uniformly. Body decoding never panics: shape mismatches surface as
//! `UpstreamError::Decode`.

pub mod upstream;
