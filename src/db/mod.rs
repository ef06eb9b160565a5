use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::RepositoryError;
use crate::models::role::{StaffPosition, DEFAULT_POSITIONS};
use crate::repositories::StaffPositionRepository;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Positions are global; the SQL migration seeds them for Postgres, this
/// does the same for the in-memory backend.
pub async fn seed_default_positions(positions: &dyn StaffPositionRepository) -> Result<(), RepositoryError> {
    for name in DEFAULT_POSITIONS {
        if positions.find_by_name(name).await?.is_none() {
            positions.save(&StaffPosition::new(name)).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryDatabase;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let db = InMemoryDatabase::new();
        seed_default_positions(&db).await.unwrap();
        seed_default_positions(&db).await.unwrap();

        let cashier = db.find_by_name("Cashier").await.unwrap().unwrap();
        assert_eq!(StaffPositionRepository::find_by_id(&db, cashier.position_id).await.unwrap(), Some(cashier));
    }
}
