//! Form domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::step::StepWithFieldsResponse;

/// Represents a form in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: i64,
    pub form_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default publish state for new forms.
fn default_is_published() -> bool {
    false
}

/// Request payload for creating a form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default = "default_is_published")]
    pub is_published: bool,
}

/// Request payload for updating a form (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub is_published: Option<bool>,
}

/// Request payload for creating a form together with its steps and fields.
///
/// Inner fields are tolerant: missing step titles, field types, labels and
/// required flags are defaulted before insert so AI-generated definitions
/// can be persisted as-is.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompleteFormRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub steps: Vec<CompleteStepInput>,
}

/// One step in a complete-form creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteStepInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<CompleteFieldInput>,
}

/// One field in a complete-form creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteFieldInput {
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    pub required: Option<bool>,
    pub options: Option<serde_json::Value>,
    pub validation_rules: Option<serde_json::Value>,
}

/// Response payload for form operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Form> for FormResponse {
    fn from(f: Form) -> Self {
        Self {
            id: f.form_id,
            user_id: f.user_id,
            title: f.title,
            description: f.description,
            is_published: f.is_published,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// Response payload for a form with its full step and field tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormWithStepsResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub steps: Vec<StepWithFieldsResponse>,
}

impl FormWithStepsResponse {
    /// Combines a form with its ordered steps.
    pub fn new(form: Form, steps: Vec<StepWithFieldsResponse>) -> Self {
        Self {
            id: form.form_id,
            user_id: form.user_id,
            title: form.title,
            description: form.description,
            is_published: form.is_published,
            created_at: form.created_at,
            updated_at: form.updated_at,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_form_request_deserialization() {
        let json = r#"{"title": "Contact"}"#;

        let request: CreateFormRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Contact");
        assert!(request.description.is_none());
        // Publish flag defaults to false
        assert!(!request.is_published);
    }

    #[test]
    fn test_create_form_request_with_all_fields() {
        let json = r#"{
            "title": "Survey",
            "description": "Quarterly survey",
            "isPublished": true
        }"#;

        let request: CreateFormRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Survey");
        assert_eq!(request.description.as_deref(), Some("Quarterly survey"));
        assert!(request.is_published);
    }

    #[test]
    fn test_create_form_request_blank_title_fails_validation() {
        let json = r#"{"title": "   "}"#;
        let request: CreateFormRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_form_request_all_optional() {
        let request: UpdateFormRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.description.is_none());
        assert!(request.is_published.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_form_response_serialization() {
        let response = FormResponse {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Contact".to_string(),
            description: None,
            is_published: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"title\":\"Contact\""));
        assert!(json.contains("\"isPublished\":false"));
        // description should be skipped when None
        assert!(!json.contains("\"description\":null"));
    }

    #[test]
    fn test_form_with_steps_response_from_form() {
        let form = Form {
            id: 1,
            form_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Contact".to_string(),
            description: Some("Reach out".to_string()),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = FormWithStepsResponse::new(form.clone(), vec![]);
        assert_eq!(response.id, form.form_id);
        assert_eq!(response.title, "Contact");
        assert!(response.steps.is_empty());

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"steps\":[]"));
    }

    #[test]
    fn test_create_complete_form_request_deserialization() {
        let json = r#"{
            "title": "Event Registration",
            "description": "Sign up",
            "steps": [
                {
                    "title": "Your Details",
                    "fields": [
                        {"type": "text", "label": "Name", "required": true},
                        {"label": "Notes"}
                    ]
                },
                {}
            ]
        }"#;

        let request: CreateCompleteFormRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Event Registration");
        assert_eq!(request.steps.len(), 2);
        assert_eq!(request.steps[0].fields.len(), 2);
        // Tolerant inner payload: missing pieces stay None for later defaulting
        assert!(request.steps[0].fields[1].field_type.is_none());
        assert!(request.steps[1].title.is_none());
        assert!(request.steps[1].fields.is_empty());
    }

    #[test]
    fn test_create_complete_form_request_steps_default_empty() {
        let json = r#"{"title": "Bare"}"#;
        let request: CreateCompleteFormRequest = serde_json::from_str(json).unwrap();
        assert!(request.steps.is_empty());
        assert!(request.validate().is_ok());
    }
}
