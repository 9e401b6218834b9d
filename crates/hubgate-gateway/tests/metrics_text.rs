#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use hubgate_gateway::obs::MetricsRegistry;

fn header_counts(text: &str, prefix: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(prefix) {
            let name = rest.split_whitespace().next().unwrap().to_string();
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    counts
}

#[test]
fn inc_n_times_shows_exactly_n() {
    let reg = MetricsRegistry::new();
    for _ in 0..7 {
        reg.inc_hit("/health");
    }
    let text = reg.render();
    assert!(text.lines().any(|l| l == "hit_counter{path=\"/health\"} 7"), "{text}");
}

#[test]
fn every_family_has_one_help_and_type() {
    let reg = MetricsRegistry::new();
    reg.inc_hit("/");
    reg.inc_hit("/vars");
    let text = reg.render();

    let help = header_counts(&text, "# HELP ");
    let types = header_counts(&text, "# TYPE ");

    for name in [
        "hit_counter",
        "process_start_time_seconds",
        "process_uptime_seconds",
        "process_resident_memory_bytes",
        "tokio_runtime_workers",
        "tokio_runtime_alive_tasks",
        "runtime_collections_total",
    ] {
        assert_eq!(help.get(name), Some(&1), "HELP for {name}");
        assert_eq!(types.get(name), Some(&1), "TYPE for {name}");
    }
    assert_eq!(help.len(), types.len());
    assert!(text.contains("# TYPE hit_counter counter\n"));
}

#[test]
fn unused_counter_still_renders_headers() {
    let text = MetricsRegistry::new().render();
    assert!(text.contains("# HELP hit_counter Count of hits per endpoint\n"));
    assert!(!text.contains("hit_counter{"));
}

#[tokio::test]
async fn runtime_collection_updates_gauges() {
    let reg = MetricsRegistry::new();
    hubgate_gateway::obs::runtime::collect_once(&reg, std::time::Duration::from_secs(5)).await;
    let text = reg.render();
    assert!(text.contains("runtime_collections_total{outcome=\"ok\"} 1"), "{text}");
    assert!(text.contains("tokio_runtime_workers 1"), "{text}");
}
