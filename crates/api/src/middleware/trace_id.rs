//! Request correlation middleware.
//!
//! Tags every request with an ID so builder flows that span several calls
//! (create a form, add steps, reorder them) can be tied together in logs.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Correlation header honored on requests and echoed on responses.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation ID carried in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    #[allow(dead_code)] // Available to handlers that log outside the span
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reuses a caller-supplied request ID when it looks sane.
///
/// IDs over 128 bytes or containing non-printable characters are discarded
/// so log lines stay greppable.
fn incoming_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
    if value.is_empty() || value.len() > 128 {
        return None;
    }
    if !value.bytes().all(|b| (0x21..=0x7e).contains(&b)) {
        return None;
    }
    Some(value.to_string())
}

/// Attaches a correlation ID to the request, the tracing span, and the
/// response headers, and logs one completion line per request.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let id = incoming_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!(
        "http_request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let started = std::time::Instant::now();
    let mut response = next.run(req).instrument(span).await;

    tracing::info!(
        request_id = %id,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
