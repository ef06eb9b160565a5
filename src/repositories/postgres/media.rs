use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::errors::RepositoryError;
use crate::models::media::Media;
use crate::repositories::MediaRepository;

pub struct PostgresMediaRepository {
    pool: PgPool,
}

impl PostgresMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, RepositoryError> {
        sqlx::query_as::<_, Media>("SELECT media_id, url FROM media WHERE media_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn save(&self, media: &Media) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO media (media_id, url) VALUES ($1, $2) ON CONFLICT (media_id) DO UPDATE SET url = EXCLUDED.url")
            .bind(media.media_id)
            .bind(&media.url)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
