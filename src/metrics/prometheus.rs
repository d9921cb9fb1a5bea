use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus HTTP exporter on :9000.
/// After this call, any metrics recorded via the `metrics` crate
/// macros (counter!, histogram!) are automatically exported at /metrics.
pub fn init_metrics_server() {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], 9000))
        .install()
        .expect("failed to start Prometheus metrics server");
}

// ── Fetch metrics ────────────────────────────────────────────────

pub fn record_fetch(endpoint: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("marketplace_fetches_total", "endpoint" => endpoint.to_string(), "outcome" => outcome.to_string())
        .increment(1);
}

pub fn record_fetch_latency(endpoint: &str, latency_ms: f64) {
    histogram!("marketplace_fetch_latency_ms", "endpoint" => endpoint.to_string())
        .record(latency_ms);
}

// ── Poller metrics ───────────────────────────────────────────────

pub fn record_cycle() {
    counter!("poller_cycles_total").increment(1);
}
