//! Lightweight in-process metrics.
//!
//! Counters and gauges are stored as atomics and rendered by the `/vars`
//! handler in Prometheus text format. `runtime` refreshes the default process
//! and scheduler gauges on a fixed interval.

pub mod metrics;
pub mod runtime;

pub use metrics::MetricsRegistry;
