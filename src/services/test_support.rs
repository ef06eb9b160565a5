use std::sync::Arc;
use uuid::Uuid;

use crate::models::role::{Role, StaffPosition, StaffRole};
use crate::models::staff::{Caller, Staff, StaffAssignment, StaffProfile};
use crate::models::store::Store;
use crate::payload::staff::{StaffRequest, StaffSalaryRequest};
use crate::repositories::memory::InMemoryDatabase;
use crate::repositories::Repositories;
use crate::storage::{FileStorage, InMemoryFileStorage};

/// A seeded store with its roles, two positions and an owner account.
pub(crate) struct Fixture {
    pub repos: Repositories,
    pub files: Arc<InMemoryFileStorage>,
    pub store_id: Uuid,
    pub owner: Caller,
}

impl Fixture {
    pub async fn new() -> Self {
        let repos = Repositories::in_memory(Arc::new(InMemoryDatabase::new()));
        let store = Store::new("Corner Shop".into());
        repos.stores.save(&store).await.unwrap();
        for role in Role::ALL {
            repos.roles.save(&StaffRole::new(role.as_str(), store.store_id)).await.unwrap();
        }
        for position in ["Manager", "Cashier"] {
            repos.positions.save(&StaffPosition::new(position)).await.unwrap();
        }

        let mut fixture = Self {
            repos,
            files: Arc::new(InMemoryFileStorage::new("test-bucket")),
            store_id: store.store_id,
            owner: Caller {
                staff_id: Uuid::nil(),
                name: String::new(),
                email: String::new(),
                store_id: store.store_id,
                role: None,
            },
        };
        fixture.owner = fixture.caller_with_role("owner@shop.vn", Some(Role::Owner)).await;
        fixture
    }

    pub fn file_storage(&self) -> Arc<dyn FileStorage> {
        self.files.clone()
    }

    /// Persists a staff row with the given role and returns it as a caller.
    pub async fn caller_with_role(&self, email: &str, role: Option<Role>) -> Caller {
        let role_row = match role {
            Some(role) => self
                .repos
                .roles
                .find_by_name_and_store_id(role.as_str(), self.store_id)
                .await
                .unwrap(),
            None => None,
        };
        let staff = Staff::new(
            StaffProfile {
                name: email.split('@').next().unwrap().to_string(),
                email: email.to_string(),
                ..Default::default()
            },
            "hash".into(),
            StaffAssignment {
                role_id: role_row.as_ref().map(|r| r.role_id),
                position_id: None,
            },
            None,
            self.store_id,
        );
        self.repos.staffs.save(&staff).await.unwrap();
        Caller {
            staff_id: staff.staff_id,
            name: staff.name,
            email: staff.email,
            store_id: self.store_id,
            role: role_row.map(|r| r.name),
        }
    }
}

pub(crate) fn staff_request(email: &str) -> StaffRequest {
    StaffRequest {
        name: "Nguyen Van A".into(),
        email: email.into(),
        password: Some("secret1".into()),
        position: "Cashier".into(),
        role: Some(Role::Staff.as_str().into()),
        ..Default::default()
    }
}

pub(crate) fn salary_request(tag: &str, amount: i64) -> StaffSalaryRequest {
    StaffSalaryRequest {
        salary_type: tag.into(),
        salary: amount,
    }
}
