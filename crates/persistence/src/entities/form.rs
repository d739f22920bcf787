//! Form entity definition.

use chrono::{DateTime, Utc};
use domain::models::Form;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the forms table.
#[derive(Debug, Clone, FromRow)]
pub struct FormEntity {
    pub id: i64,
    pub form_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FormEntity> for Form {
    fn from(entity: FormEntity) -> Self {
        Form {
            id: entity.id,
            form_id: entity.form_id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            is_published: entity.is_published,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_form_entity() -> FormEntity {
        FormEntity {
            id: 1,
            form_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Customer Feedback".to_string(),
            description: Some("Collect feedback after support calls".to_string()),
            is_published: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_form_entity_to_model_conversion() {
        let entity = create_test_form_entity();
        let form_id = entity.form_id;
        let user_id = entity.user_id;

        let form: Form = entity.into();

        assert_eq!(form.id, 1);
        assert_eq!(form.form_id, form_id);
        assert_eq!(form.user_id, user_id);
        assert_eq!(form.title, "Customer Feedback");
        assert!(!form.is_published);
    }

    #[test]
    fn test_form_entity_without_description() {
        let mut entity = create_test_form_entity();
        entity.description = None;

        let form: Form = entity.into();

        assert!(form.description.is_none());
    }
}
