use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::errors::RepositoryError;
use crate::models::store::Store;
use crate::repositories::StoreRepository;

pub struct PostgresStoreRepository {
    pool: PgPool,
}

impl PostgresStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PostgresStoreRepository {
    async fn save(&self, store: &Store) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO stores (store_id, name, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (store_id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(store.store_id)
        .bind(&store.name)
        .bind(store.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, RepositoryError> {
        sqlx::query_as::<_, Store>("SELECT store_id, name, created_at FROM stores WHERE store_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }
}
