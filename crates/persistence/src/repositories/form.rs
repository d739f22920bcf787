//! Form repository for database operations.

use crate::entities::{FieldEntity, FormEntity, StepEntity};
use crate::metrics::QueryTimer;
use domain::models::form::{CreateCompleteFormRequest, CreateFormRequest, UpdateFormRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// Fallback applied when an optional text value is missing or blank.
fn text_or(value: &Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => fallback.to_string(),
    }
}

/// Repository for form database operations.
#[derive(Clone)]
pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    /// Create a new form repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new form owned by the given user.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateFormRequest,
    ) -> Result<FormEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_form");
        let form = sqlx::query_as::<_, FormEntity>(
            r#"
            INSERT INTO forms (user_id, title, description, is_published)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.is_published)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(form)
    }

    /// Find a form by its public identifier.
    pub async fn find_by_form_id(&self, form_id: Uuid) -> Result<Option<FormEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_form_by_form_id");
        let form = sqlx::query_as::<_, FormEntity>(
            r#"
            SELECT * FROM forms WHERE form_id = $1
            "#,
        )
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(form)
    }

    /// List all forms owned by a user, newest first.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<FormEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_forms_by_user");
        let forms = sqlx::query_as::<_, FormEntity>(
            r#"
            SELECT * FROM forms
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(forms)
    }

    /// Apply a partial update to a form. Absent fields keep their stored value.
    pub async fn update(
        &self,
        form_id: Uuid,
        request: &UpdateFormRequest,
    ) -> Result<Option<FormEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_form");
        let form = sqlx::query_as::<_, FormEntity>(
            r#"
            UPDATE forms
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_published = COALESCE($4, is_published),
                updated_at = NOW()
            WHERE form_id = $1
            RETURNING *
            "#,
        )
        .bind(form_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.is_published)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(form)
    }

    /// Mark a form as published. Publishing an already published form is a
    /// no-op that still returns the row.
    pub async fn publish(&self, form_id: Uuid) -> Result<Option<FormEntity>, sqlx::Error> {
        let timer = QueryTimer::new("publish_form");
        let form = sqlx::query_as::<_, FormEntity>(
            r#"
            UPDATE forms
            SET is_published = TRUE,
                updated_at = NOW()
            WHERE form_id = $1
            RETURNING *
            "#,
        )
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(form)
    }

    /// Delete a form. Steps, fields and submissions go with it through
    /// cascading foreign keys.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete(&self, form_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_form");
        let result = sqlx::query(
            r#"
            DELETE FROM forms WHERE form_id = $1
            "#,
        )
        .bind(form_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Create a form together with all of its steps and fields in a single
    /// transaction.
    ///
    /// Step and field order indexes are assigned from input position. Missing
    /// or blank step titles become "Untitled Step", missing field types
    /// become "text" and missing labels become "Field", so partially shaped
    /// input (typically machine-generated) still produces a usable form.
    pub async fn create_complete(
        &self,
        user_id: Uuid,
        request: &CreateCompleteFormRequest,
    ) -> Result<(FormEntity, Vec<(StepEntity, Vec<FieldEntity>)>), sqlx::Error> {
        let timer = QueryTimer::new("create_complete_form");

        let mut tx = self.pool.begin().await?;

        let form = sqlx::query_as::<_, FormEntity>(
            r#"
            INSERT INTO forms (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.description)
        .fetch_one(&mut *tx)
        .await?;

        let mut steps = Vec::with_capacity(request.steps.len());
        for (step_index, step_input) in request.steps.iter().enumerate() {
            let step = sqlx::query_as::<_, StepEntity>(
                r#"
                INSERT INTO form_steps (form_id, title, description, order_index)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(form.form_id)
            .bind(text_or(&step_input.title, "Untitled Step"))
            .bind(&step_input.description)
            .bind(step_index as i32)
            .fetch_one(&mut *tx)
            .await?;

            let mut fields = Vec::with_capacity(step_input.fields.len());
            for (field_index, field_input) in step_input.fields.iter().enumerate() {
                let field = sqlx::query_as::<_, FieldEntity>(
                    r#"
                    INSERT INTO form_fields
                        (step_id, field_type, label, placeholder, default_value,
                         required, order_index, options, validation_rules)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    RETURNING *
                    "#,
                )
                .bind(step.step_id)
                .bind(text_or(&field_input.field_type, "text"))
                .bind(text_or(&field_input.label, "Field"))
                .bind(&field_input.placeholder)
                .bind(&field_input.default_value)
                .bind(field_input.required.unwrap_or(false))
                .bind(field_index as i32)
                .bind(&field_input.options)
                .bind(&field_input.validation_rules)
                .fetch_one(&mut *tx)
                .await?;
                fields.push(field);
            }

            steps.push((step, fields));
        }

        tx.commit().await?;

        timer.record();
        Ok((form, steps))
    }
}
