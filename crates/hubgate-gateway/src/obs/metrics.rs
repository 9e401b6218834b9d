//! Minimal metrics registry for the gateway.
//!
//! Counter and gauge families backed by atomics, with dynamic labels stored in
//! a `DashMap`. Labels are flattened into sorted key vectors so a label tuple
//! maps to one series regardless of the order callers pass it in.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use super::runtime::RuntimeMetrics;

/// Name of the per-path hit counter shared by every handler.
pub const HIT_COUNTER: &str = "hit_counter";

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn write_sample(out: &mut String, name: &str, key: &LabelKey, val: impl std::fmt::Display) {
    if key.is_empty() {
        let _ = writeln!(out, "{} {}", name, val);
        return;
    }
    let label_str = key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>().join(",");
    let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
}

/// Monotonic counter family.
pub struct CounterVec {
    name: &'static str,
    help: &'static str,
    label_names: Vec<&'static str>,
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn new(name: &'static str, help: &'static str, label_names: &[&'static str]) -> Self {
        let mut label_names = label_names.to_vec();
        label_names.sort_unstable();
        Self { name, help, label_names, map: DashMap::new() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value. Tuples that do not match the declared
    /// label names are dropped.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let Some(key) = self.key(labels) else {
            tracing::warn!(metric = self.name, ?labels, "label names do not match, sample dropped");
            return;
        };
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.key(labels)
            .and_then(|k| self.map.get(&k).map(|c| c.load(Ordering::Relaxed)))
            .unwrap_or(0)
    }

    fn key(&self, labels: &[(&str, &str)]) -> Option<LabelKey> {
        let mut key: LabelKey = labels.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();

        let names_match = key.len() == self.label_names.len()
            && key.iter().zip(&self.label_names).all(|((k, _), n)| k == n);
        names_match.then_some(key)
    }

    /// Render in Prometheus text exposition format.
    pub(crate) fn render(&self, out: &mut String) {
        write_header(out, self.name, self.help, "counter");
        for r in self.map.iter() {
            write_sample(out, self.name, r.key(), r.value().load(Ordering::Relaxed));
        }
    }
}

/// Unlabeled gauge.
pub struct Gauge {
    name: &'static str,
    help: &'static str,
    value: AtomicI64,
}

impl Gauge {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self { name, help, value: AtomicI64::new(0) }
    }

    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    pub(crate) fn render(&self, out: &mut String) {
        write_header(out, self.name, self.help, "gauge");
        write_sample(out, self.name, &Vec::new(), self.get());
    }
}

/// Process-wide registry: the shared hit counter plus default runtime metrics.
pub struct MetricsRegistry {
    pub hits: CounterVec,
    pub runtime: RuntimeMetrics,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            hits: CounterVec::new(HIT_COUNTER, "Count of hits per endpoint", &["path"]),
            runtime: RuntimeMetrics::new(),
        }
    }

    /// Count one request on `path`.
    pub fn inc_hit(&self, path: &str) {
        self.hits.inc(&[("path", path)]);
    }

    /// Render every registered family.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.hits.render(&mut out);
        self.runtime.render(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_split_series() {
        let c = CounterVec::new("x_total", "x", &["a", "b"]);
        c.inc(&[("a", "1"), ("b", "2")]);
        c.inc(&[("b", "2"), ("a", "1")]);
        assert_eq!(c.get(&[("a", "1"), ("b", "2")]), 2);
    }

    #[test]
    fn mismatched_labels_are_dropped() {
        let c = CounterVec::new("x_total", "x", &["path"]);
        c.inc(&[("route", "/")]);
        c.inc(&[]);
        let mut out = String::new();
        c.render(&mut out);
        assert_eq!(out, "# HELP x_total x\n# TYPE x_total counter\n");
    }

    #[test]
    fn label_values_are_escaped() {
        let c = CounterVec::new("x_total", "x", &["path"]);
        c.inc(&[("path", "/a\"b\\c\nd")]);
        let mut out = String::new();
        c.render(&mut out);
        assert!(out.contains(r#"x_total{path="/a\"b\\c\nd"} 1"#), "{out}");
    }

    #[test]
    fn gauge_renders_without_braces() {
        let g = Gauge::new("y", "y help");
        g.set(-3);
        let mut out = String::new();
        g.render(&mut out);
        assert_eq!(out, "# HELP y y help\n# TYPE y gauge\ny -3\n");
    }
}
