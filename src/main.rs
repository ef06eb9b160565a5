use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use store_backoffice::config::{AppConfig, FileStorageBackend, PersistenceBackend};
use store_backoffice::db;
use store_backoffice::handlers;
use store_backoffice::repositories::memory::InMemoryDatabase;
use store_backoffice::repositories::Repositories;
use store_backoffice::state::AppState;
use store_backoffice::storage::s3::create_s3_client;
use store_backoffice::storage::{FileStorage, InMemoryFileStorage, S3FileStorage};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let repos = match &config.persistence {
        PersistenceBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to connect to the database");
            db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            Repositories::postgres(pool)
        }
        PersistenceBackend::InMemory => {
            info!("Using in-memory persistence; data is lost on shutdown");
            let repos = Repositories::in_memory(Arc::new(InMemoryDatabase::new()));
            db::seed_default_positions(repos.positions.as_ref())
                .await
                .expect("Failed to seed staff positions");
            repos
        }
    };

    let files: Arc<dyn FileStorage> = match &config.file_storage {
        FileStorageBackend::S3 { bucket, region } => {
            let client = create_s3_client(region.clone()).await;
            Arc::new(S3FileStorage::new(client, bucket.clone(), config.upload_tmp_dir.clone()))
        }
        FileStorageBackend::InMemory { bucket } => Arc::new(InMemoryFileStorage::new(bucket.clone())),
    };

    let state = AppState::new(repos, files, config.jwt_secret.clone());

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
