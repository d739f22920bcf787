//! Submission repository for database operations.

use crate::entities::SubmissionEntity;
use crate::metrics::QueryTimer;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for submission database operations.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Create a new submission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a submission against a form. The payload is stored as given,
    /// without validation against the form definition. The submission
    /// timestamp is assigned by the database.
    pub async fn create(
        &self,
        form_id: Uuid,
        data: &Value,
    ) -> Result<SubmissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_submission");
        let submission = sqlx::query_as::<_, SubmissionEntity>(
            r#"
            INSERT INTO submissions (form_id, data)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(form_id)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(submission)
    }

    /// List the submissions of a form, newest first.
    pub async fn list_by_form(
        &self,
        form_id: Uuid,
    ) -> Result<Vec<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_submissions_by_form");
        let submissions = sqlx::query_as::<_, SubmissionEntity>(
            r#"
            SELECT * FROM submissions
            WHERE form_id = $1
            ORDER BY submitted_at DESC, id DESC
            "#,
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(submissions)
    }
}
