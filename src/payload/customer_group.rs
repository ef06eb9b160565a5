use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Serialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroupRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroupResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<Uuid>,
    pub customer_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
