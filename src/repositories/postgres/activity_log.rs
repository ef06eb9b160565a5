use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::errors::RepositoryError;
use crate::models::activity_log::ActivityLog;
use crate::repositories::ActivityLogRepository;

pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append(&self, log: &ActivityLog) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO activity_logs (log_id, action, description, staff_name, store_id, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(log.log_id)
        .bind(&log.action)
        .bind(&log.description)
        .bind(&log.staff_name)
        .bind(log.store_id)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<ActivityLog>, RepositoryError> {
        sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT log_id, action, description, staff_name, store_id, created_at
            FROM activity_logs
            WHERE store_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}
