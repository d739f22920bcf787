//! Form field endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::FieldRepository;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::field::{
    CreateFieldRequest, FieldResponse, ReorderFieldsRequest, UpdateFieldRequest,
};
use domain::models::Field;

/// Response for a batch reorder.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: u64,
}

/// Append a field to a step.
///
/// POST /api/steps/:step_id/fields
///
/// The order index is assigned by the server, after the step's current
/// highest index.
pub async fn create_field(
    State(state): State<AppState>,
    Path(step_id): Path<Uuid>,
    Json(request): Json<CreateFieldRequest>,
) -> Result<(StatusCode, Json<FieldResponse>), ApiError> {
    request.validate()?;

    let repo = FieldRepository::new(state.pool.clone());
    let field = repo
        .create_for_step(step_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Step not found".to_string()))?;

    info!(field_id = %field.field_id, step_id = %step_id, "Field created");

    let field: Field = field.into();
    Ok((StatusCode::CREATED, Json(FieldResponse::from(field))))
}

/// Apply a partial update to a field.
///
/// PUT /api/fields/:field_id
pub async fn update_field(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
    Json(request): Json<UpdateFieldRequest>,
) -> Result<Json<FieldResponse>, ApiError> {
    request.validate()?;

    let repo = FieldRepository::new(state.pool.clone());
    let field = repo
        .update(field_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Field not found".to_string()))?;

    let field: Field = field.into();
    Ok(Json(FieldResponse::from(field)))
}

/// Delete a field.
///
/// DELETE /api/fields/:field_id
pub async fn delete_field(
    State(state): State<AppState>,
    Path(field_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = FieldRepository::new(state.pool.clone());
    let deleted = repo.delete(field_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Field not found".to_string()));
    }

    info!(field_id = %field_id, "Field deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Reassign the order indexes of a step's fields in one transaction.
///
/// POST /api/steps/:step_id/fields/reorder
///
/// Entries that do not belong to the step are skipped.
pub async fn reorder_fields(
    State(state): State<AppState>,
    Path(step_id): Path<Uuid>,
    Json(request): Json<ReorderFieldsRequest>,
) -> Result<Json<ReorderResponse>, ApiError> {
    request.validate()?;

    let repo = FieldRepository::new(state.pool.clone());
    let updated = repo
        .reorder(step_id, &request.fields)
        .await?
        .ok_or_else(|| ApiError::NotFound("Step not found".to_string()))?;

    info!(step_id = %step_id, updated = updated, "Fields reordered");

    Ok(Json(ReorderResponse { updated }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_field_request_deserialization() {
        let json = r#"{
            "type": "select",
            "label": "Country",
            "options": [{"label": "Norway", "value": "no"}]
        }"#;
        let request: CreateFieldRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.field_type, "select");
        assert_eq!(request.label, "Country");
        assert!(!request.required);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_field_request_rejects_blank_type() {
        let json = r#"{"type": "  ", "label": "Volume"}"#;
        let request: CreateFieldRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_field_request_partial() {
        let json = r#"{"label": "Full name", "required": true}"#;
        let request: UpdateFieldRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.label.as_deref(), Some("Full name"));
        assert_eq!(request.required, Some(true));
        assert!(request.field_type.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reorder_fields_request_deserialization() {
        let json = r#"{
            "fields": [
                {"id": "550e8400-e29b-41d4-a716-446655440000", "orderIndex": 1},
                {"id": "550e8400-e29b-41d4-a716-446655440001", "orderIndex": 0}
            ]
        }"#;
        let request: ReorderFieldsRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.fields.len(), 2);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reorder_response_serialization() {
        let response = ReorderResponse { updated: 2 };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"updated":2}"#);
    }
}
