//! Form field entity definition.

use domain::models::Field;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the form_fields table.
///
/// `field_type` is stored as free text. The generation layer constrains it
/// to a known vocabulary, but rows written through the CRUD API may carry
/// any non-blank value.
#[derive(Debug, Clone, FromRow)]
pub struct FieldEntity {
    pub id: i64,
    pub field_id: Uuid,
    pub step_id: Uuid,
    pub field_type: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub order_index: i32,
    pub options: Option<Value>,
    pub validation_rules: Option<Value>,
}

impl From<FieldEntity> for Field {
    fn from(entity: FieldEntity) -> Self {
        Field {
            id: entity.id,
            field_id: entity.field_id,
            step_id: entity.step_id,
            field_type: entity.field_type,
            label: entity.label,
            placeholder: entity.placeholder,
            default_value: entity.default_value,
            required: entity.required,
            order_index: entity.order_index,
            options: entity.options,
            validation_rules: entity.validation_rules,
        }
    }
}
