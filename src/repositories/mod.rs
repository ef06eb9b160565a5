//! Persistence contracts, one trait per aggregate.
//!
//! `postgres` holds the `sqlx` implementations used in production;
//! `memory` holds a single in-process store implementing every trait, used by
//! the tests and by `PERSISTENCE_BACKEND=memory`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::models::activity_log::ActivityLog;
use crate::models::customer::Customer;
use crate::models::customer_group::CustomerGroup;
use crate::models::media::Media;
use crate::models::role::{StaffPosition, StaffRole};
use crate::models::shift::{Shift, ShiftAttendanceRecord};
use crate::models::staff::{Staff, StaffSalary};
use crate::models::store::Store;

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn save(&self, store: &Store) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, RepositoryError>;
}

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, RepositoryError>;
    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Staff>, RepositoryError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
    async fn exists_by_cccd(&self, cccd: &str) -> Result<bool, RepositoryError>;
    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, RepositoryError>;
    /// Insert or overwrite the row with the same id.
    async fn save(&self, staff: &Staff) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait StaffRoleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffRole>, RepositoryError>;
    async fn find_by_name_and_store_id(
        &self,
        name: &str,
        store_id: Uuid,
    ) -> Result<Option<StaffRole>, RepositoryError>;
    async fn save(&self, role: &StaffRole) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait StaffPositionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffPosition>, RepositoryError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<StaffPosition>, RepositoryError>;
    async fn save(&self, position: &StaffPosition) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait StaffSalaryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffSalary>, RepositoryError>;
    async fn find_by_staff_id(&self, staff_id: Uuid) -> Result<Option<StaffSalary>, RepositoryError>;
    async fn save(&self, salary: &StaffSalary) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, RepositoryError>;
    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Shift>, RepositoryError>;
    async fn save(&self, shift: &Shift) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn save(&self, record: &ShiftAttendanceRecord) -> Result<(), RepositoryError>;
    async fn find_by_staff_id(&self, staff_id: Uuid) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError>;
    /// Records with `from <= date < until`, oldest first.
    async fn find_by_staff_id_between(
        &self,
        staff_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError>;
    async fn delete_by_staff_id(&self, staff_id: Uuid) -> Result<u64, RepositoryError>;
    async fn delete_by_shift_id(&self, shift_id: Uuid) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait CustomerGroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerGroup>, RepositoryError>;
    async fn find_by_name_and_store_id(
        &self,
        name: &str,
        store_id: Uuid,
    ) -> Result<Option<CustomerGroup>, RepositoryError>;
    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<CustomerGroup>, RepositoryError>;
    async fn save(&self, group: &CustomerGroup) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError>;
    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Customer>, RepositoryError>;
    async fn find_ids_by_group_id(&self, group_id: Uuid) -> Result<Vec<Uuid>, RepositoryError>;
    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, RepositoryError>;
    async fn save(&self, media: &Media) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, log: &ActivityLog) -> Result<(), RepositoryError>;
    /// Newest first.
    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<ActivityLog>, RepositoryError>;
}

/// Every repository the services depend on, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub stores: Arc<dyn StoreRepository>,
    pub staffs: Arc<dyn StaffRepository>,
    pub roles: Arc<dyn StaffRoleRepository>,
    pub positions: Arc<dyn StaffPositionRepository>,
    pub salaries: Arc<dyn StaffSalaryRepository>,
    pub shifts: Arc<dyn ShiftRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub customer_groups: Arc<dyn CustomerGroupRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub media: Arc<dyn MediaRepository>,
    pub activity_logs: Arc<dyn ActivityLogRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            stores: Arc::new(postgres::PostgresStoreRepository::new(pool.clone())),
            staffs: Arc::new(postgres::PostgresStaffRepository::new(pool.clone())),
            roles: Arc::new(postgres::PostgresStaffRoleRepository::new(pool.clone())),
            positions: Arc::new(postgres::PostgresStaffPositionRepository::new(pool.clone())),
            salaries: Arc::new(postgres::PostgresStaffSalaryRepository::new(pool.clone())),
            shifts: Arc::new(postgres::PostgresShiftRepository::new(pool.clone())),
            attendance: Arc::new(postgres::PostgresAttendanceRepository::new(pool.clone())),
            customer_groups: Arc::new(postgres::PostgresCustomerGroupRepository::new(pool.clone())),
            customers: Arc::new(postgres::PostgresCustomerRepository::new(pool.clone())),
            media: Arc::new(postgres::PostgresMediaRepository::new(pool.clone())),
            activity_logs: Arc::new(postgres::PostgresActivityLogRepository::new(pool)),
        }
    }

    pub fn in_memory(db: Arc<memory::InMemoryDatabase>) -> Self {
        Self {
            stores: db.clone(),
            staffs: db.clone(),
            roles: db.clone(),
            positions: db.clone(),
            salaries: db.clone(),
            shifts: db.clone(),
            attendance: db.clone(),
            customer_groups: db.clone(),
            customers: db.clone(),
            media: db.clone(),
            activity_logs: db,
        }
    }
}
