use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authorization tiers seeded for every store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Owner,
    Staff,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Owner, Role::Staff];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Owner => "OWNER",
            Role::Staff => "STAFF",
        }
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaffRole {
    pub role_id: Uuid,
    pub name: String,
    pub store_id: Uuid,
}

impl StaffRole {
    pub fn new(name: &str, store_id: Uuid) -> Self {
        Self {
            role_id: Uuid::new_v4(),
            name: name.to_string(),
            store_id,
        }
    }
}

/// Job positions available to every store.
pub const DEFAULT_POSITIONS: [&str; 4] = ["Manager", "Cashier", "Sales", "Warehouse"];

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaffPosition {
    pub position_id: Uuid,
    pub name: String,
}

impl StaffPosition {
    pub fn new(name: &str) -> Self {
        Self {
            position_id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}
