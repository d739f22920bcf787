//! Security headers applied to every response.

use std::sync::OnceLock;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Headers stamped on all responses. The API serves JSON plus caller-supplied
/// submission payloads, so sniffing and framing are shut off outright.
const BASE_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "no-referrer"),
];

static HSTS_ENABLED: OnceLock<bool> = OnceLock::new();

/// HSTS must only be sent where TLS terminates properly, so it stays off
/// unless FB__SECURITY__HSTS_ENABLED=true. Read once, not per request.
fn hsts_enabled() -> bool {
    *HSTS_ENABLED.get_or_init(|| {
        std::env::var("FB__SECURITY__HSTS_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in BASE_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    if hsts_enabled() {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
