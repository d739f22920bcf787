//! Form step entity definition.

use domain::models::Step;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the form_steps table.
#[derive(Debug, Clone, FromRow)]
pub struct StepEntity {
    pub id: i64,
    pub step_id: Uuid,
    pub form_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
}

impl From<StepEntity> for Step {
    fn from(entity: StepEntity) -> Self {
        Step {
            id: entity.id,
            step_id: entity.step_id,
            form_id: entity.form_id,
            title: entity.title,
            description: entity.description,
            order_index: entity.order_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_step_entity() -> StepEntity {
        StepEntity {
            id: 1,
            step_id: Uuid::new_v4(),
            form_id: Uuid::new_v4(),
            title: "Contact Details".to_string(),
            description: Some("How can we reach you?".to_string()),
            order_index: 0,
        }
    }

    #[test]
    fn test_step_entity_to_model_conversion() {
        let entity = create_test_step_entity();
        let step_id = entity.step_id;
        let form_id = entity.form_id;

        let step: Step = entity.into();

        assert_eq!(step.id, 1);
        assert_eq!(step.step_id, step_id);
        assert_eq!(step.form_id, form_id);
        assert_eq!(step.title, "Contact Details");
        assert_eq!(step.order_index, 0);
    }

    #[test]
    fn test_step_entity_preserves_order_index() {
        let mut entity = create_test_step_entity();
        entity.order_index = 7;

        let step: Step = entity.into();

        assert_eq!(step.order_index, 7);
    }
}
