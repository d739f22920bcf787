//! Form template entity definition.

use domain::models::Template;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the templates table.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateEntity {
    pub id: i64,
    pub template_id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub config: Value,
}

impl From<TemplateEntity> for Template {
    fn from(entity: TemplateEntity) -> Self {
        Template {
            id: entity.id,
            template_id: entity.template_id,
            name: entity.name,
            description: entity.description,
            icon: entity.icon,
            category: entity.category,
            config: entity.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_template_entity() -> TemplateEntity {
        TemplateEntity {
            id: 1,
            template_id: Uuid::new_v4(),
            name: "Contact Form".to_string(),
            description: "Simple contact form with name, email and message".to_string(),
            icon: "Mail".to_string(),
            category: "Business".to_string(),
            config: json!({
                "title": "Contact Form",
                "steps": [{"title": "Your Details", "fields": []}]
            }),
        }
    }

    #[test]
    fn test_template_entity_to_model_conversion() {
        let entity = create_test_template_entity();
        let template_id = entity.template_id;

        let template: Template = entity.into();

        assert_eq!(template.id, 1);
        assert_eq!(template.template_id, template_id);
        assert_eq!(template.name, "Contact Form");
        assert_eq!(template.category, "Business");
        assert_eq!(template.config["title"], "Contact Form");
    }
}
