//! Submission entity definition.

use chrono::{DateTime, Utc};
use domain::models::Submission;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the submissions table.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionEntity {
    pub id: i64,
    pub submission_id: Uuid,
    pub form_id: Uuid,
    pub data: Value,
    pub submitted_at: DateTime<Utc>,
}

impl From<SubmissionEntity> for Submission {
    fn from(entity: SubmissionEntity) -> Self {
        Submission {
            id: entity.id,
            submission_id: entity.submission_id,
            form_id: entity.form_id,
            data: entity.data,
            submitted_at: entity.submitted_at,
        }
    }
}
