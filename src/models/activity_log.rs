use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
}

impl ActivityAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "CREATE",
            ActivityAction::Update => "UPDATE",
            ActivityAction::Delete => "DELETE",
        }
    }
}

/// Append-only audit entry. Never updated or deleted.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub log_id: Uuid,
    pub action: String,
    pub description: String,
    pub staff_name: String,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(action: ActivityAction, description: String, staff_name: String, store_id: Uuid) -> Self {
        Self {
            log_id: Uuid::new_v4(),
            action: action.as_str().to_string(),
            description,
            staff_name,
            store_id,
            created_at: Utc::now(),
        }
    }
}
