//! Form template repository for database operations.

use crate::entities::TemplateEntity;
use crate::metrics::QueryTimer;
use serde_json::Value;
use sqlx::PgPool;

/// Repository for the read-only template catalog.
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Create a new template repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every template in the catalog, in seed order.
    pub async fn list_all(&self) -> Result<Vec<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_templates");
        let templates = sqlx::query_as::<_, TemplateEntity>(
            r#"
            SELECT * FROM templates ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(templates)
    }

    /// Count the templates in the catalog. Used by the startup seeder to
    /// decide whether seeding is needed.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_templates");
        let count = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM templates
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Insert a template into the catalog.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        icon: &str,
        category: &str,
        config: &Value,
    ) -> Result<TemplateEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_template");
        let template = sqlx::query_as::<_, TemplateEntity>(
            r#"
            INSERT INTO templates (name, description, icon, category, config)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(category)
        .bind(config)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_repository_creation() {
        // This test verifies the TemplateRepository can be created
        // Actual database tests are integration tests
    }
}
