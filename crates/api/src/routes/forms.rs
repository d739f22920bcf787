//! Form endpoint handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{FieldRepository, FormRepository, StepRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::record_form_created;
use domain::models::field::FieldResponse;
use domain::models::form::{
    CreateCompleteFormRequest, CreateFormRequest, FormResponse, FormWithStepsResponse,
    UpdateFormRequest,
};
use domain::models::step::StepWithFieldsResponse;
use domain::models::{Field, Form, Step};

/// List the caller's forms, newest first.
///
/// GET /api/forms
pub async fn list_forms(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<FormResponse>>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let forms = repo.list_by_user(user.user_id).await?;

    let response = forms
        .into_iter()
        .map(|entity| {
            let form: Form = entity.into();
            FormResponse::from(form)
        })
        .collect();

    Ok(Json(response))
}

/// Fetch a form with its full step and field tree.
///
/// GET /api/forms/:form_id
///
/// Public so respondents can load the form structure without signing in.
/// Access is not gated on the published flag.
pub async fn get_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<FormWithStepsResponse>, ApiError> {
    let form_repo = FormRepository::new(state.pool.clone());
    let form = form_repo
        .find_by_form_id(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let steps = load_step_tree(&state, form_id).await?;

    Ok(Json(FormWithStepsResponse::new(form.into(), steps)))
}

/// Create a new draft form.
///
/// POST /api/forms
pub async fn create_form(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<FormResponse>), ApiError> {
    request.validate()?;

    let repo = FormRepository::new(state.pool.clone());
    let form = repo.create(user.user_id, &request).await?;

    record_form_created();
    info!(form_id = %form.form_id, user_id = %user.user_id, "Form created");

    let form: Form = form.into();
    Ok((StatusCode::CREATED, Json(FormResponse::from(form))))
}

/// Create a form together with steps and fields in one transaction.
///
/// POST /api/forms/create-complete
pub async fn create_complete_form(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCompleteFormRequest>,
) -> Result<(StatusCode, Json<FormWithStepsResponse>), ApiError> {
    request.validate()?;

    let limits = &state.config.limits;
    if request.steps.len() > limits.max_steps_per_form {
        return Err(ApiError::Validation(format!(
            "A form can have at most {} steps",
            limits.max_steps_per_form
        )));
    }
    for (index, step) in request.steps.iter().enumerate() {
        if step.fields.len() > limits.max_fields_per_step {
            return Err(ApiError::Validation(format!(
                "Step {} exceeds the limit of {} fields per step",
                index + 1,
                limits.max_fields_per_step
            )));
        }
    }

    let repo = FormRepository::new(state.pool.clone());
    let (form, steps) = repo.create_complete(user.user_id, &request).await?;

    record_form_created();
    info!(
        form_id = %form.form_id,
        user_id = %user.user_id,
        steps = steps.len(),
        "Complete form created"
    );

    let steps = steps
        .into_iter()
        .map(|(step, fields)| {
            let step: Step = step.into();
            let fields = fields
                .into_iter()
                .map(|entity| {
                    let field: Field = entity.into();
                    FieldResponse::from(field)
                })
                .collect();
            StepWithFieldsResponse::new(step, fields)
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(FormWithStepsResponse::new(form.into(), steps)),
    ))
}

/// Apply a partial update to a form.
///
/// PUT /api/forms/:form_id
pub async fn update_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(request): Json<UpdateFormRequest>,
) -> Result<Json<FormResponse>, ApiError> {
    request.validate()?;

    let repo = FormRepository::new(state.pool.clone());
    let form = repo
        .update(form_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let form: Form = form.into();
    Ok(Json(FormResponse::from(form)))
}

/// Mark a form as published.
///
/// POST /api/forms/:form_id/publish
///
/// Publishing an already published form is a no-op that returns the form.
pub async fn publish_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<FormResponse>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let form = repo
        .publish(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    info!(form_id = %form_id, "Form published");

    let form: Form = form.into();
    Ok(Json(FormResponse::from(form)))
}

/// Delete a form and everything under it.
///
/// DELETE /api/forms/:form_id
pub async fn delete_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let deleted = repo.delete(form_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Form not found".to_string()));
    }

    info!(form_id = %form_id, "Form deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Load a form's steps with their fields, both in display order.
///
/// Fields for the whole form come back in one query and are grouped per
/// step, so the tree assembly stays at two queries regardless of size.
pub(crate) async fn load_step_tree(
    state: &AppState,
    form_id: Uuid,
) -> Result<Vec<StepWithFieldsResponse>, ApiError> {
    let steps = StepRepository::new(state.pool.clone())
        .list_by_form(form_id)
        .await?;
    let fields = FieldRepository::new(state.pool.clone())
        .list_by_form(form_id)
        .await?;

    let mut fields_by_step: HashMap<Uuid, Vec<FieldResponse>> = HashMap::new();
    for entity in fields {
        let field: Field = entity.into();
        fields_by_step
            .entry(field.step_id)
            .or_default()
            .push(FieldResponse::from(field));
    }

    Ok(steps
        .into_iter()
        .map(|entity| {
            let step: Step = entity.into();
            let fields = fields_by_step.remove(&step.step_id).unwrap_or_default();
            StepWithFieldsResponse::new(step, fields)
        })
        .collect())
}
