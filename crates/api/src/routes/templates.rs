//! Template catalog endpoint handlers.

use axum::{extract::State, Json};
use persistence::repositories::TemplateRepository;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::template::TemplateResponse;
use domain::models::Template;

/// List the template catalog.
///
/// GET /api/templates
///
/// The catalog is seeded at startup and read-only through the API.
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateResponse>>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let templates = repo.list_all().await?;

    let response = templates
        .into_iter()
        .map(|entity| {
            let template: Template = entity.into();
            TemplateResponse::from(template)
        })
        .collect();

    Ok(Json(response))
}
