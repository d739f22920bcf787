//! Form field domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::step::ReorderItem;

/// Input types the builder and generation layer understand.
///
/// Storage does not constrain the column to this vocabulary; persisted
/// rows keep whatever string was supplied at creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Select,
    Checkbox,
    Radio,
    Textarea,
    Date,
}

impl FieldType {
    /// Converts to the wire/database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Textarea => "textarea",
            FieldType::Date => "date",
        }
    }

    /// Parses from the wire/database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "select" => Some(FieldType::Select),
            "checkbox" => Some(FieldType::Checkbox),
            "radio" => Some(FieldType::Radio),
            "textarea" => Some(FieldType::Textarea),
            "date" => Some(FieldType::Date),
            _ => None,
        }
    }

    /// Whether fields of this type carry a meaningful option list.
    pub fn uses_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

/// A selectable option on a select/radio field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Represents one input definition within a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: i64,
    pub field_id: Uuid,
    pub step_id: Uuid,
    pub field_type: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub order_index: i32,
    pub options: Option<serde_json::Value>,
    pub validation_rules: Option<serde_json::Value>,
}

/// Default required flag for new fields.
fn default_required() -> bool {
    false
}

/// Request payload for creating a field.
///
/// `orderIndex` is never accepted from the client; the server appends the
/// field after the step's current last index.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldRequest {
    #[serde(rename = "type")]
    #[validate(
        length(min = 1, max = 50, message = "Type must be 1-50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub field_type: String,

    #[validate(
        length(min = 1, max = 200, message = "Label must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub label: String,

    #[validate(length(max = 500, message = "Placeholder must be at most 500 characters"))]
    pub placeholder: Option<String>,

    #[validate(length(max = 500, message = "Default value must be at most 500 characters"))]
    pub default_value: Option<String>,

    #[serde(default = "default_required")]
    pub required: bool,

    pub options: Option<serde_json::Value>,

    pub validation_rules: Option<serde_json::Value>,
}

/// Request payload for updating a field (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    #[serde(rename = "type")]
    #[validate(
        length(min = 1, max = 50, message = "Type must be 1-50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub field_type: Option<String>,

    #[validate(
        length(min = 1, max = 200, message = "Label must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub label: Option<String>,

    #[validate(length(max = 500, message = "Placeholder must be at most 500 characters"))]
    pub placeholder: Option<String>,

    #[validate(length(max = 500, message = "Default value must be at most 500 characters"))]
    pub default_value: Option<String>,

    pub required: Option<bool>,

    #[validate(custom(function = "shared::validation::validate_order_index"))]
    pub order_index: Option<i32>,

    pub options: Option<serde_json::Value>,

    pub validation_rules: Option<serde_json::Value>,
}

/// Request payload for reordering the fields of a step.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderFieldsRequest {
    #[validate(nested)]
    pub fields: Vec<ReorderItem>,
}

/// Response payload for field operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub id: Uuid,
    pub step_id: Uuid,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub required: bool,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<serde_json::Value>,
}

impl From<Field> for FieldResponse {
    fn from(f: Field) -> Self {
        Self {
            id: f.field_id,
            step_id: f.step_id,
            field_type: f.field_type,
            label: f.label,
            placeholder: f.placeholder,
            default_value: f.default_value,
            required: f.required,
            order_index: f.order_index,
            options: f.options,
            validation_rules: f.validation_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_serialization() {
        assert_eq!(serde_json::to_string(&FieldType::Text).unwrap(), "\"text\"");
        assert_eq!(
            serde_json::to_string(&FieldType::Textarea).unwrap(),
            "\"textarea\""
        );
        assert_eq!(serde_json::to_string(&FieldType::Date).unwrap(), "\"date\"");
    }

    #[test]
    fn test_field_type_as_str_round_trip() {
        let all = [
            FieldType::Text,
            FieldType::Number,
            FieldType::Select,
            FieldType::Checkbox,
            FieldType::Radio,
            FieldType::Textarea,
            FieldType::Date,
        ];
        for ty in all {
            assert_eq!(FieldType::from_str(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_field_type_from_str_unknown() {
        assert_eq!(FieldType::from_str("email"), None);
        assert_eq!(FieldType::from_str("TEXT"), None);
        assert_eq!(FieldType::from_str(""), None);
    }

    #[test]
    fn test_field_type_uses_options() {
        assert!(FieldType::Select.uses_options());
        assert!(FieldType::Radio.uses_options());
        assert!(!FieldType::Text.uses_options());
        assert!(!FieldType::Checkbox.uses_options());
        assert!(!FieldType::Date.uses_options());
    }

    #[test]
    fn test_create_field_request_deserialization() {
        let json = r#"{"type": "text", "label": "Name"}"#;

        let request: CreateFieldRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.field_type, "text");
        assert_eq!(request.label, "Name");
        // Required defaults to false
        assert!(!request.required);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_field_request_with_options() {
        let json = r#"{
            "type": "select",
            "label": "Country",
            "placeholder": "Pick one",
            "required": true,
            "options": [
                {"label": "Slovakia", "value": "sk"},
                {"label": "Czechia", "value": "cz"}
            ],
            "validationRules": {"minSelections": 1}
        }"#;

        let request: CreateFieldRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.field_type, "select");
        assert!(request.required);
        assert!(request.options.is_some());
        assert!(request.validation_rules.is_some());
    }

    #[test]
    fn test_create_field_request_type_outside_vocabulary_accepted() {
        // Storage does not gate the vocabulary; only blank types are rejected
        let json = r#"{"type": "email", "label": "Work email"}"#;
        let request: CreateFieldRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());

        let blank = r#"{"type": " ", "label": "Work email"}"#;
        let request: CreateFieldRequest = serde_json::from_str(blank).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_field_request_partial() {
        let json = r#"{"label": "Full name", "required": true}"#;

        let request: UpdateFieldRequest = serde_json::from_str(json).unwrap();
        assert!(request.field_type.is_none());
        assert_eq!(request.label.as_deref(), Some("Full name"));
        assert_eq!(request.required, Some(true));
        assert!(request.order_index.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reorder_fields_request_deserialization() {
        let json = r#"{
            "fields": [
                {"id": "550e8400-e29b-41d4-a716-446655440000", "orderIndex": 2},
                {"id": "550e8400-e29b-41d4-a716-446655440001", "orderIndex": 0}
            ]
        }"#;

        let request: ReorderFieldsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.fields.len(), 2);
        assert_eq!(request.fields[0].order_index, 2);
    }

    #[test]
    fn test_field_option_round_trip() {
        let option = FieldOption {
            label: "Option 1".to_string(),
            value: "option_1".to_string(),
        };

        let json = serde_json::to_string(&option).unwrap();
        assert_eq!(json, r#"{"label":"Option 1","value":"option_1"}"#);

        let back: FieldOption = serde_json::from_str(&json).unwrap();
        assert_eq!(back, option);
    }

    #[test]
    fn test_field_response_serialization() {
        let field = Field {
            id: 3,
            field_id: Uuid::new_v4(),
            step_id: Uuid::new_v4(),
            field_type: "text".to_string(),
            label: "Name".to_string(),
            placeholder: None,
            default_value: None,
            required: true,
            order_index: 0,
            options: None,
            validation_rules: None,
        };

        let response = FieldResponse::from(field.clone());
        assert_eq!(response.id, field.field_id);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"required\":true"));
        assert!(!json.contains("\"placeholder\":null"));
        assert!(!json.contains("\"options\":null"));
    }
}
