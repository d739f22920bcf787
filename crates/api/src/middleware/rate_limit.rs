//! Per-user rate limiting.
//!
//! Each authenticated user gets an independent quota. Unauthenticated
//! requests pass through untouched; they either hit public routes or die
//! in the auth layer anyway.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::auth::AuthUser;

type KeyedLimiter = GovRateLimiter<Uuid, DefaultKeyedStateStore<Uuid>, DefaultClock>;

/// Keyed token bucket shared by all requests. Stale user entries are kept
/// in memory until process restart, which is fine at this catalog's scale.
pub struct RateLimiterState {
    limiter: KeyedLimiter,
    limit_per_minute: u32,
}

impl RateLimiterState {
    pub fn new(limit_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(limit_per_minute)
            .unwrap_or_else(|| NonZeroU32::new(100).unwrap());
        Self {
            limiter: GovRateLimiter::keyed(Quota::per_minute(per_minute)),
            limit_per_minute,
        }
    }

    /// Ok when the request fits the user's quota, otherwise the number of
    /// seconds to wait (at least 1, so the Retry-After header is honest).
    pub fn check(&self, user_id: Uuid) -> Result<(), u64> {
        self.limiter.check_key(&user_id).map_err(|not_until| {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            wait.as_secs().max(1)
        })
    }
}

/// Applies the per-user quota. Must be layered inside auth so the
/// [`AuthUser`] extension is already populated.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let auth = match req.extensions().get::<AuthUser>() {
        Some(auth) => auth.clone(),
        None => return next.run(req).await,
    };

    if let Some(ref rate_limiter) = state.rate_limiter {
        if let Err(retry_after) = rate_limiter.check(auth.user_id) {
            return rate_limited_response(rate_limiter.limit_per_minute, retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limited",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retryAfter": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    if let Ok(value) = retry_after.to_string().parse() {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_enforced_per_user() {
        let state = RateLimiterState::new(3);
        let user = Uuid::new_v4();

        for n in 0..3 {
            assert!(state.check(user).is_ok(), "request {} within quota", n);
        }

        let retry_after = state.check(user).unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_users_do_not_share_quota() {
        let state = RateLimiterState::new(1);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(state.check(first).is_ok());
        assert!(state.check(second).is_ok());
        assert!(state.check(first).is_err());
        assert!(state.check(second).is_err());
    }

    #[test]
    fn test_zero_limit_falls_back_to_default() {
        // Guarded in app wiring, but a zero here must not panic
        let state = RateLimiterState::new(0);
        assert_eq!(state.limit_per_minute, 0);
        assert!(state.check(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_many_distinct_users_all_admitted() {
        let state = RateLimiterState::new(10);
        for _ in 0..100 {
            assert!(state.check(Uuid::new_v4()).is_ok());
        }
    }

    #[test]
    fn test_rate_limited_response_shape() {
        let response = rate_limited_response(100, 42);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }
}
