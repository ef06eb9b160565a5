use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Store {
    pub store_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Store {
    pub fn new(name: String) -> Self {
        Self {
            store_id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}
