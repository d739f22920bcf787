use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::FormGenerator;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_auth,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{ai, fields, forms, health, steps, submissions, templates, transcribe};
use crate::services::{GeminiFormGenerator, TranscriptionClient};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub generator: Option<Arc<dyn FormGenerator>>,
    pub transcriber: Option<Arc<TranscriptionClient>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    // Wire up the Gemini-backed generator only when configured with an API key
    let generator: Option<Arc<dyn FormGenerator>> =
        if config.ai.enabled && !config.ai.api_key.is_empty() {
            match GeminiFormGenerator::new(config.ai.clone()) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to initialize form generator");
                    None
                }
            }
        } else {
            None
        };

    let transcriber = if config.transcription.enabled && !config.transcription.api_key.is_empty() {
        match TranscriptionClient::new(config.transcription.clone()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize transcription client");
                None
            }
        }
    } else {
        None
    };

    build_app(config, pool, generator, transcriber)
}

/// Builds the app with an injected generator. Used by tests to swap in a mock.
pub fn create_app_with_generator(
    config: Config,
    pool: PgPool,
    generator: Arc<dyn FormGenerator>,
) -> Router {
    build_app(config, pool, Some(generator), None)
}

fn build_app(
    config: Config,
    pool: PgPool,
    generator: Option<Arc<dyn FormGenerator>>,
    transcriber: Option<Arc<TranscriptionClient>>,
) -> Router {
    let config = Arc::new(config);

    // Create rate limiter if rate limiting is enabled (rate_limit_per_minute > 0)
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
        generator,
        transcriber,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes (require JWT authentication)
    // Middleware order: auth runs first, then rate limiting (which needs the auth info)
    let protected_routes = Router::new()
        // Form routes
        .route("/api/forms", get(forms::list_forms).post(forms::create_form))
        .route(
            "/api/forms/create-complete",
            post(forms::create_complete_form),
        )
        .route(
            "/api/forms/:form_id",
            put(forms::update_form).delete(forms::delete_form),
        )
        .route("/api/forms/:form_id/publish", post(forms::publish_form))
        // Step routes
        .route("/api/forms/:form_id/steps", post(steps::create_step))
        .route(
            "/api/forms/:form_id/steps/reorder",
            post(steps::reorder_steps),
        )
        .route(
            "/api/steps/:step_id",
            put(steps::update_step).delete(steps::delete_step),
        )
        // Field routes
        .route("/api/steps/:step_id/fields", post(fields::create_field))
        .route(
            "/api/steps/:step_id/fields/reorder",
            post(fields::reorder_fields),
        )
        .route(
            "/api/fields/:field_id",
            put(fields::update_field).delete(fields::delete_field),
        )
        // Submission listing (creation is public, listing is not)
        .route(
            "/api/forms/:form_id/submissions",
            get(submissions::list_submissions),
        )
        // Template catalog
        .route("/api/templates", get(templates::list_templates))
        // AI generation
        .route("/api/ai/generate-form", post(ai::generate_form))
        // Rate limiting runs after auth (needs user ID from auth)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        // The fill-out surface fetches forms and posts submissions without credentials
        .route("/api/forms/:form_id", get(forms::get_form))
        .route(
            "/api/forms/:form_id/submissions",
            post(submissions::create_submission)
                .layer(DefaultBodyLimit::max(config.limits.max_submission_bytes)),
        )
        .route(
            "/api/transcribe",
            post(transcribe::transcribe_audio)
                .layer(DefaultBodyLimit::max(config.transcription.max_audio_bytes)),
        );

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
