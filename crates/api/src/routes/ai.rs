//! AI form generation endpoint handlers.

use axum::{extract::State, Json};
use tracing::{error, info};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::record_form_generated;
use domain::services::generation::{GenerateFormRequest, GeneratedForm, GenerationError};

/// Generate a form definition from a natural-language prompt.
///
/// POST /api/ai/generate-form
///
/// The result is a normalized definition only. Nothing is persisted; the
/// client reviews it and saves through the create-complete endpoint.
pub async fn generate_form(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateFormRequest>,
) -> Result<Json<GeneratedForm>, ApiError> {
    request.validate()?;

    let generator = state.generator.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Form generation is not configured".to_string())
    })?;

    match generator.generate(&request).await {
        Ok(form) => {
            record_form_generated("ok");
            info!(
                user_id = %user.user_id,
                steps = form.steps.len(),
                "Form generated"
            );
            Ok(Json(form))
        }
        Err(GenerationError::NotConfigured) => {
            record_form_generated("error");
            Err(ApiError::ServiceUnavailable(
                "Form generation is not configured".to_string(),
            ))
        }
        Err(e) => {
            record_form_generated("error");
            error!(error = %e, user_id = %user.user_id, "Form generation failed");
            Err(ApiError::BadGateway("Failed to generate form".to_string()))
        }
    }
}
