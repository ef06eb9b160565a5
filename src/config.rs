use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceBackend {
    Postgres { database_url: String },
    InMemory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileStorageBackend {
    S3 { bucket: String, region: Option<String> },
    InMemory { bucket: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub jwt_secret: String,
    pub persistence: PersistenceBackend,
    pub file_storage: FileStorageBackend,
    /// Where uploads are staged before being sent to the bucket.
    pub upload_tmp_dir: PathBuf,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        let persistence = match lookup("PERSISTENCE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => PersistenceBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => PersistenceBackend::InMemory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "PERSISTENCE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let bucket = lookup("AWS_S3_BUCKET").ok_or(ConfigError::Missing("AWS_S3_BUCKET"))?;
        let file_storage = match lookup("FILE_STORAGE_BACKEND").as_deref().unwrap_or("s3") {
            "s3" => FileStorageBackend::S3 {
                bucket,
                region: lookup("AWS_REGION"),
            },
            "memory" => FileStorageBackend::InMemory { bucket },
            other => {
                return Err(ConfigError::Invalid {
                    name: "FILE_STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            jwt_secret,
            persistence,
            file_storage,
            upload_tmp_dir: lookup("UPLOAD_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_postgres_and_s3() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_URL", "postgres://localhost/store"),
            ("AWS_S3_BUCKET", "store-media"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(
            config.persistence,
            PersistenceBackend::Postgres {
                database_url: "postgres://localhost/store".into()
            }
        );
        assert_eq!(
            config.file_storage,
            FileStorageBackend::S3 {
                bucket: "store-media".into(),
                region: None
            }
        );
    }

    #[test]
    fn memory_backends_do_not_need_a_database() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "secret"),
            ("PERSISTENCE_BACKEND", "memory"),
            ("FILE_STORAGE_BACKEND", "memory"),
            ("AWS_S3_BUCKET", "local"),
        ]))
        .unwrap();

        assert_eq!(config.persistence, PersistenceBackend::InMemory);
        assert_eq!(config.file_storage, FileStorageBackend::InMemory { bucket: "local".into() });
    }

    #[test]
    fn rejects_empty_secret_and_unknown_backend() {
        let empty = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "")]));
        assert!(matches!(empty, Err(ConfigError::Empty("JWT_SECRET"))));

        let unknown = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "secret"),
            ("PERSISTENCE_BACKEND", "sqlite"),
        ]));
        assert!(matches!(unknown, Err(ConfigError::Invalid { .. })));
    }
}
