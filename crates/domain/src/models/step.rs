//! Form step domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::field::FieldResponse;

/// Represents one ordered step of a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: i64,
    pub step_id: Uuid,
    pub form_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
}

/// Request payload for creating a step.
///
/// `orderIndex` is never accepted from the client; the server appends the
/// step after the form's current last index.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStepRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// Request payload for updating a step (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStepRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_order_index"))]
    pub order_index: Option<i32>,
}

/// One target position in a reorder batch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub id: Uuid,

    #[validate(custom(function = "shared::validation::validate_order_index"))]
    pub order_index: i32,
}

/// Request payload for reordering the steps of a form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderStepsRequest {
    #[validate(nested)]
    pub steps: Vec<ReorderItem>,
}

/// Response payload for step operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i32,
}

impl From<Step> for StepResponse {
    fn from(s: Step) -> Self {
        Self {
            id: s.step_id,
            form_id: s.form_id,
            title: s.title,
            description: s.description,
            order_index: s.order_index,
        }
    }
}

/// Response payload for a step with its ordered fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepWithFieldsResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order_index: i32,
    pub fields: Vec<FieldResponse>,
}

impl StepWithFieldsResponse {
    /// Combines a step with its ordered fields.
    pub fn new(step: Step, fields: Vec<FieldResponse>) -> Self {
        Self {
            id: step.step_id,
            form_id: step.form_id,
            title: step.title,
            description: step.description,
            order_index: step.order_index,
            fields,
        }
    }
}
