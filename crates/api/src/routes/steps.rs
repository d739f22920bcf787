//! Form step endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::StepRepository;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::step::{
    CreateStepRequest, ReorderStepsRequest, StepResponse, UpdateStepRequest,
};
use domain::models::Step;

/// Response for a batch reorder.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: u64,
}

/// Append a step to a form.
///
/// POST /api/forms/:form_id/steps
///
/// The order index is assigned by the server, after the form's current
/// highest index.
pub async fn create_step(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(request): Json<CreateStepRequest>,
) -> Result<(StatusCode, Json<StepResponse>), ApiError> {
    request.validate()?;

    let repo = StepRepository::new(state.pool.clone());
    let step = repo
        .create_for_form(form_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    info!(step_id = %step.step_id, form_id = %form_id, "Step created");

    let step: Step = step.into();
    Ok((StatusCode::CREATED, Json(StepResponse::from(step))))
}

/// Apply a partial update to a step.
///
/// PUT /api/steps/:step_id
pub async fn update_step(
    State(state): State<AppState>,
    Path(step_id): Path<Uuid>,
    Json(request): Json<UpdateStepRequest>,
) -> Result<Json<StepResponse>, ApiError> {
    request.validate()?;

    let repo = StepRepository::new(state.pool.clone());
    let step = repo
        .update(step_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Step not found".to_string()))?;

    let step: Step = step.into();
    Ok(Json(StepResponse::from(step)))
}

/// Delete a step and its fields.
///
/// DELETE /api/steps/:step_id
pub async fn delete_step(
    State(state): State<AppState>,
    Path(step_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = StepRepository::new(state.pool.clone());
    let deleted = repo.delete(step_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Step not found".to_string()));
    }

    info!(step_id = %step_id, "Step deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Reassign the order indexes of a form's steps in one transaction.
///
/// POST /api/forms/:form_id/steps/reorder
///
/// Entries that do not belong to the form are skipped.
pub async fn reorder_steps(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(request): Json<ReorderStepsRequest>,
) -> Result<Json<ReorderResponse>, ApiError> {
    request.validate()?;

    let repo = StepRepository::new(state.pool.clone());
    let updated = repo
        .reorder(form_id, &request.steps)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    info!(form_id = %form_id, updated = updated, "Steps reordered");

    Ok(Json(ReorderResponse { updated }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_response_serialization() {
        let response = ReorderResponse { updated: 3 };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"updated":3}"#);
    }

    #[test]
    fn test_create_step_request_minimal() {
        let json = r#"{"title": "Shipping"}"#;
        let request: CreateStepRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.title, "Shipping");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_step_request_order_index_only() {
        let json = r#"{"orderIndex": 2}"#;
        let request: UpdateStepRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.order_index, Some(2));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reorder_request_rejects_negative_index() {
        let json = r#"{
            "steps": [{"id": "550e8400-e29b-41d4-a716-446655440000", "orderIndex": -1}]
        }"#;
        let request: ReorderStepsRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }
}
