//! Submission endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{FormRepository, SubmissionRepository};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_submission_received;
use domain::models::submission::{CreateSubmissionRequest, SubmissionResponse};
use domain::models::Submission;

/// Record a respondent's answers.
///
/// POST /api/forms/:form_id/submissions
///
/// Public so anyone with the form link can submit. The payload is stored
/// opaquely and is not validated against the form's field definitions, and
/// unpublished forms accept submissions too.
pub async fn create_submission(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(request): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    // Verify the form exists
    let form_repo = FormRepository::new(state.pool.clone());
    form_repo
        .find_by_form_id(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let repo = SubmissionRepository::new(state.pool.clone());
    let submission = repo.create(form_id, &request.data).await?;

    record_submission_received();
    info!(
        submission_id = %submission.submission_id,
        form_id = %form_id,
        "Submission received"
    );

    let submission: Submission = submission.into();
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(submission)),
    ))
}

/// List a form's submissions, newest first.
///
/// GET /api/forms/:form_id/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    // Verify the form exists
    let form_repo = FormRepository::new(state.pool.clone());
    form_repo
        .find_by_form_id(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let repo = SubmissionRepository::new(state.pool.clone());
    let submissions = repo.list_by_form(form_id).await?;

    let response = submissions
        .into_iter()
        .map(|entity| {
            let submission: Submission = entity.into();
            SubmissionResponse::from(submission)
        })
        .collect();

    Ok(Json(response))
}
