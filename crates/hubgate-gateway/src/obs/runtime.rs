//! Default runtime metrics.
//!
//! Process and scheduler gauges refreshed by a background task. Each
//! collection round is bounded by a timeout; a round that overruns is counted
//! and skipped, never retried.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tokio::task::JoinHandle;

use super::metrics::{CounterVec, Gauge, MetricsRegistry};

pub struct RuntimeMetrics {
    started: Instant,
    pub start_time: Gauge,
    pub uptime: Gauge,
    pub resident_memory: Gauge,
    pub workers: Gauge,
    pub alive_tasks: Gauge,
    pub collections: CounterVec,
}

impl Default for RuntimeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        let start_time = Gauge::new(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds.",
        );
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        start_time.set(i64::try_from(secs).unwrap_or(i64::MAX));

        Self {
            started: Instant::now(),
            start_time,
            uptime: Gauge::new("process_uptime_seconds", "Seconds since the process started."),
            resident_memory: Gauge::new(
                "process_resident_memory_bytes",
                "Resident memory size in bytes.",
            ),
            workers: Gauge::new("tokio_runtime_workers", "Number of runtime worker threads."),
            alive_tasks: Gauge::new("tokio_runtime_alive_tasks", "Number of alive runtime tasks."),
            collections: CounterVec::new(
                "runtime_collections_total",
                "Runtime metric collection rounds by outcome.",
                &["outcome"],
            ),
        }
    }

    pub(crate) fn render(&self, out: &mut String) {
        self.start_time.render(out);
        self.uptime.render(out);
        self.resident_memory.render(out);
        self.workers.render(out);
        self.alive_tasks.render(out);
        self.collections.render(out);
    }

    /// One collection round.
    pub async fn collect(&self) {
        let up = self.started.elapsed().as_secs();
        self.uptime.set(i64::try_from(up).unwrap_or(i64::MAX));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let m = handle.metrics();
            self.workers.set(i64::try_from(m.num_workers()).unwrap_or(i64::MAX));
            self.alive_tasks.set(i64::try_from(m.num_alive_tasks()).unwrap_or(i64::MAX));
        }

        if let Some(bytes) = resident_memory_bytes().await {
            self.resident_memory.set(i64::try_from(bytes).unwrap_or(i64::MAX));
        }
    }
}

/// Run one bounded collection round. Returns false when it timed out.
pub async fn collect_once(registry: &MetricsRegistry, timeout: Duration) -> bool {
    let runtime = &registry.runtime;
    bounded_round(runtime, timeout, runtime.collect()).await
}

async fn bounded_round<F>(runtime: &RuntimeMetrics, timeout: Duration, round: F) -> bool
where
    F: Future<Output = ()>,
{
    match tokio::time::timeout(timeout, round).await {
        Ok(()) => {
            runtime.collections.inc(&[("outcome", "ok")]);
            true
        }
        Err(_) => {
            runtime.collections.inc(&[("outcome", "timeout")]);
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(timeout_ms, "runtime metrics collection timed out");
            false
        }
    }
}

/// Collect immediately, then every `interval`, for the life of the process.
pub fn spawn_collector(
    registry: Arc<MetricsRegistry>,
    interval: Duration,
    timeout: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            collect_once(&registry, timeout).await;
        }
    })
}

#[cfg(target_os = "linux")]
async fn resident_memory_bytes() -> Option<u64> {
    let status = tokio::fs::read_to_string("/proc/self/status").await.ok()?;
    parse_vm_rss(&status)
}

#[cfg(not(target_os = "linux"))]
async fn resident_memory_bytes() -> Option<u64> {
    None
}

/// `VmRSS:     1234 kB` -> bytes.
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}
