//! Prometheus metrics for the HTTP surface.
//!
//! Request counters and latency histograms are labeled with the matched
//! route template rather than the raw path, so `/api/forms/3f2a...` and
//! `/api/forms/77bc...` land in the same series.

use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Latency buckets in seconds. Generation and transcription calls sit at
/// the slow end, form CRUD at the fast end.
const LATENCY_BUCKETS: &[f64] = &[
    0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Installs the global Prometheus recorder.
///
/// Must run once at startup, before the first request is served.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)
        .expect("Failed to set histogram buckets")
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        panic!("Prometheus recorder already installed");
    }
}

/// Records one counter increment and one latency observation per request.
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().as_str().to_owned();
    let route = route_label(&req);

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => route.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => route
    )
    .record(started.elapsed().as_secs_f64());

    response
}

/// Requests that match no route (scanner probes, typoed paths) are folded
/// into a single "unmatched" series to keep label cardinality bounded.
fn route_label(req: &Request<Body>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

/// Counts created forms, both empty and from a complete definition.
pub fn record_form_created() {
    counter!("forms_created_total").increment(1);
}

/// Counts accepted submissions.
pub fn record_submission_received() {
    counter!("submissions_received_total").increment(1);
}

/// Counts generation attempts by outcome ("ok" or "error").
pub fn record_form_generated(outcome: &str) {
    counter!("forms_generated_total", "outcome" => outcome.to_string()).increment(1);
}

/// GET /metrics in Prometheus text exposition format.
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(axum::http::header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_label_unmatched() {
        let req = Request::builder()
            .uri("/definitely/not/a/route")
            .body(Body::empty())
            .unwrap();
        assert_eq!(route_label(&req), "unmatched");
    }

    #[test]
    fn test_latency_buckets_strictly_increasing() {
        for pair in LATENCY_BUCKETS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
