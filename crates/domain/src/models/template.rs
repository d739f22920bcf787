//! Form template domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry describing a pre-built form.
///
/// `config` mirrors the form+steps+fields shape and is consumed by the
/// builder to seed a new form tree. The catalog is seeded at startup and
/// never mutated by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: i64,
    pub template_id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub config: serde_json::Value,
}

/// Response payload for template operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub config: serde_json::Value,
}

impl From<Template> for TemplateResponse {
    fn from(t: Template) -> Self {
        Self {
            id: t.template_id,
            name: t.name,
            description: t.description,
            icon: t.icon,
            category: t.category,
            config: t.config,
        }
    }
}
