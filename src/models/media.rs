use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored file referenced by staff avatars and customer images.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Media {
    pub media_id: Uuid,
    pub url: String,
}

impl Media {
    pub fn new(url: String) -> Self {
        Self {
            media_id: Uuid::new_v4(),
            url,
        }
    }
}
