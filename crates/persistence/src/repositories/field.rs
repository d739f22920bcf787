//! Form field repository for database operations.

use crate::entities::FieldEntity;
use crate::metrics::QueryTimer;
use domain::models::field::{CreateFieldRequest, UpdateFieldRequest};
use domain::models::step::ReorderItem;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for form field database operations.
#[derive(Clone)]
pub struct FieldRepository {
    pool: PgPool,
}

impl FieldRepository {
    /// Create a new field repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a field to a step.
    ///
    /// The order index is never taken from the caller. It is computed as
    /// max(order_index) + 1 (or 0 for the first field) in the same
    /// transaction as the insert.
    ///
    /// Returns `None` when the step does not exist.
    pub async fn create_for_step(
        &self,
        step_id: Uuid,
        request: &CreateFieldRequest,
    ) -> Result<Option<FieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_field");

        let mut tx = self.pool.begin().await?;

        let step_count = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM form_steps WHERE step_id = $1
            "#,
        )
        .bind(step_id)
        .fetch_one(&mut *tx)
        .await?;

        if step_count.0 == 0 {
            return Ok(None);
        }

        let next_index = sqlx::query_as::<_, (i32,)>(
            r#"
            SELECT COALESCE(MAX(order_index) + 1, 0) FROM form_fields WHERE step_id = $1
            "#,
        )
        .bind(step_id)
        .fetch_one(&mut *tx)
        .await?;

        let field = sqlx::query_as::<_, FieldEntity>(
            r#"
            INSERT INTO form_fields
                (step_id, field_type, label, placeholder, default_value,
                 required, order_index, options, validation_rules)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(step_id)
        .bind(&request.field_type)
        .bind(&request.label)
        .bind(&request.placeholder)
        .bind(&request.default_value)
        .bind(request.required)
        .bind(next_index.0)
        .bind(&request.options)
        .bind(&request.validation_rules)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        timer.record();
        Ok(Some(field))
    }

    /// Find a field by its public identifier.
    pub async fn find_by_field_id(
        &self,
        field_id: Uuid,
    ) -> Result<Option<FieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_field_by_field_id");
        let field = sqlx::query_as::<_, FieldEntity>(
            r#"
            SELECT * FROM form_fields WHERE field_id = $1
            "#,
        )
        .bind(field_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(field)
    }

    /// List the fields of a step in display order.
    pub async fn list_by_step(&self, step_id: Uuid) -> Result<Vec<FieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_fields_by_step");
        let fields = sqlx::query_as::<_, FieldEntity>(
            r#"
            SELECT * FROM form_fields
            WHERE step_id = $1
            ORDER BY order_index ASC, id ASC
            "#,
        )
        .bind(step_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(fields)
    }

    /// List every field belonging to a form, ordered by step position first
    /// and field position second. Used to assemble the full form tree in one
    /// round trip instead of one query per step.
    pub async fn list_by_form(&self, form_id: Uuid) -> Result<Vec<FieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_fields_by_form");
        let fields = sqlx::query_as::<_, FieldEntity>(
            r#"
            SELECT f.*
            FROM form_fields f
            JOIN form_steps s ON s.step_id = f.step_id
            WHERE s.form_id = $1
            ORDER BY s.order_index ASC, s.id ASC, f.order_index ASC, f.id ASC
            "#,
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(fields)
    }

    /// Apply a partial update to a field. Absent fields keep their stored
    /// value.
    pub async fn update(
        &self,
        field_id: Uuid,
        request: &UpdateFieldRequest,
    ) -> Result<Option<FieldEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_field");
        let field = sqlx::query_as::<_, FieldEntity>(
            r#"
            UPDATE form_fields
            SET field_type = COALESCE($2, field_type),
                label = COALESCE($3, label),
                placeholder = COALESCE($4, placeholder),
                default_value = COALESCE($5, default_value),
                required = COALESCE($6, required),
                order_index = COALESCE($7, order_index),
                options = COALESCE($8, options),
                validation_rules = COALESCE($9, validation_rules)
            WHERE field_id = $1
            RETURNING *
            "#,
        )
        .bind(field_id)
        .bind(&request.field_type)
        .bind(&request.label)
        .bind(&request.placeholder)
        .bind(&request.default_value)
        .bind(request.required)
        .bind(request.order_index)
        .bind(&request.options)
        .bind(&request.validation_rules)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(field)
    }

    /// Assign new order indexes to a batch of fields in a single transaction.
    ///
    /// Entries whose id does not belong to the step are skipped. Returns the
    /// number of fields updated, or `None` when the step does not exist.
    pub async fn reorder(
        &self,
        step_id: Uuid,
        items: &[ReorderItem],
    ) -> Result<Option<u64>, sqlx::Error> {
        let timer = QueryTimer::new("reorder_fields");

        let mut tx = self.pool.begin().await?;

        let step_count = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM form_steps WHERE step_id = $1
            "#,
        )
        .bind(step_id)
        .fetch_one(&mut *tx)
        .await?;

        if step_count.0 == 0 {
            return Ok(None);
        }

        let mut updated = 0u64;
        for item in items {
            let result = sqlx::query(
                r#"
                UPDATE form_fields
                SET order_index = $1
                WHERE field_id = $2 AND step_id = $3
                "#,
            )
            .bind(item.order_index)
            .bind(item.id)
            .bind(step_id)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;

        timer.record();
        Ok(Some(updated))
    }

    /// Delete a field.
    ///
    /// Remaining fields keep their order indexes, so deletion leaves a gap.
    /// Returns the number of rows deleted.
    pub async fn delete(&self, field_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_field");
        let result = sqlx::query(
            r#"
            DELETE FROM form_fields WHERE field_id = $1
            "#,
        )
        .bind(field_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
