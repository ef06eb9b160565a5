use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomerGroup {
    pub group_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: Option<Uuid>,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl CustomerGroup {
    pub fn new(name: String, description: Option<String>, creator_id: Option<Uuid>, store_id: Uuid) -> Self {
        Self {
            group_id: Uuid::new_v4(),
            name,
            description,
            creator_id,
            store_id,
            created_at: Utc::now(),
        }
    }
}
