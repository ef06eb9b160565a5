use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::*;

#[derive(Default)]
struct Tables {
    stores: HashMap<Uuid, Store>,
    staffs: HashMap<Uuid, Staff>,
    roles: HashMap<Uuid, StaffRole>,
    positions: HashMap<Uuid, StaffPosition>,
    salaries: HashMap<Uuid, StaffSalary>,
    shifts: HashMap<Uuid, Shift>,
    attendance: Vec<ShiftAttendanceRecord>,
    customer_groups: HashMap<Uuid, CustomerGroup>,
    customers: HashMap<Uuid, Customer>,
    media: HashMap<Uuid, Media>,
    activity_logs: Vec<ActivityLog>,
}

/// Process-local store implementing every repository trait.
///
/// Lists come back in insertion-independent but deterministic order
/// (creation time, then id) so callers see the same ordering as the
/// Postgres implementation.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreRepository for InMemoryDatabase {
    async fn save(&self, store: &Store) -> Result<(), RepositoryError> {
        self.tables.lock().await.stores.insert(store.store_id, store.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, RepositoryError> {
        Ok(self.tables.lock().await.stores.get(&id).cloned())
    }
}

#[async_trait]
impl StaffRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, RepositoryError> {
        Ok(self.tables.lock().await.staffs.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.staffs.values().find(|s| s.email == email).cloned())
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Staff>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut staffs: Vec<Staff> = tables
            .staffs
            .values()
            .filter(|s| s.store_id == store_id)
            .cloned()
            .collect();
        staffs.sort_by_key(|s| (s.created_at, s.staff_id));
        Ok(staffs)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.staffs.values().any(|s| s.email == email))
    }

    async fn exists_by_cccd(&self, cccd: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.staffs.values().any(|s| s.cccd.as_deref() == Some(cccd)))
    }

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .staffs
            .values()
            .any(|s| s.phone_number.as_deref() == Some(phone_number)))
    }

    async fn save(&self, staff: &Staff) -> Result<(), RepositoryError> {
        self.tables.lock().await.staffs.insert(staff.staff_id, staff.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.attendance.iter().any(|r| r.staff_id == id) {
            return Err(RepositoryError::Database(format!(
                "staff {} is still referenced by attendance records",
                id
            )));
        }
        tables.staffs.remove(&id);
        tables.salaries.retain(|_, salary| salary.staff_id != id);
        for staff in tables.staffs.values_mut() {
            if staff.creator_id == Some(id) {
                staff.creator_id = None;
            }
        }
        for group in tables.customer_groups.values_mut() {
            if group.creator_id == Some(id) {
                group.creator_id = None;
            }
        }
        for customer in tables.customers.values_mut() {
            if customer.creator_id == Some(id) {
                customer.creator_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StaffRoleRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffRole>, RepositoryError> {
        Ok(self.tables.lock().await.roles.get(&id).cloned())
    }

    async fn find_by_name_and_store_id(
        &self,
        name: &str,
        store_id: Uuid,
    ) -> Result<Option<StaffRole>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .roles
            .values()
            .find(|r| r.name == name && r.store_id == store_id)
            .cloned())
    }

    async fn save(&self, role: &StaffRole) -> Result<(), RepositoryError> {
        self.tables.lock().await.roles.insert(role.role_id, role.clone());
        Ok(())
    }
}

#[async_trait]
impl StaffPositionRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffPosition>, RepositoryError> {
        Ok(self.tables.lock().await.positions.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StaffPosition>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.positions.values().find(|p| p.name == name).cloned())
    }

    async fn save(&self, position: &StaffPosition) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .await
            .positions
            .insert(position.position_id, position.clone());
        Ok(())
    }
}

#[async_trait]
impl StaffSalaryRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffSalary>, RepositoryError> {
        Ok(self.tables.lock().await.salaries.get(&id).cloned())
    }

    async fn find_by_staff_id(&self, staff_id: Uuid) -> Result<Option<StaffSalary>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.salaries.values().find(|s| s.staff_id == staff_id).cloned())
    }

    async fn save(&self, salary: &StaffSalary) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .await
            .salaries
            .insert(salary.salary_id, salary.clone());
        Ok(())
    }
}

#[async_trait]
impl ShiftRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, RepositoryError> {
        Ok(self.tables.lock().await.shifts.get(&id).cloned())
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Shift>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut shifts: Vec<Shift> = tables
            .shifts
            .values()
            .filter(|s| s.store_id == store_id)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.start_time, s.shift_id));
        Ok(shifts)
    }

    async fn save(&self, shift: &Shift) -> Result<(), RepositoryError> {
        self.tables.lock().await.shifts.insert(shift.shift_id, shift.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.tables.lock().await.shifts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryDatabase {
    async fn save(&self, record: &ShiftAttendanceRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.attendance.retain(|r| r.record_id != record.record_id);
        tables.attendance.push(record.clone());
        Ok(())
    }

    async fn find_by_staff_id(&self, staff_id: Uuid) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut records: Vec<ShiftAttendanceRecord> = tables
            .attendance
            .iter()
            .filter(|r| r.staff_id == staff_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.date, r.record_id));
        Ok(records)
    }

    async fn find_by_staff_id_between(
        &self,
        staff_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError> {
        let records = AttendanceRepository::find_by_staff_id(self, staff_id).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.date >= from && r.date < until)
            .collect())
    }

    async fn delete_by_staff_id(&self, staff_id: Uuid) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let before = tables.attendance.len();
        tables.attendance.retain(|r| r.staff_id != staff_id);
        Ok((before - tables.attendance.len()) as u64)
    }

    async fn delete_by_shift_id(&self, shift_id: Uuid) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let before = tables.attendance.len();
        tables.attendance.retain(|r| r.shift_id != shift_id);
        Ok((before - tables.attendance.len()) as u64)
    }
}

#[async_trait]
impl CustomerGroupRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerGroup>, RepositoryError> {
        Ok(self.tables.lock().await.customer_groups.get(&id).cloned())
    }

    async fn find_by_name_and_store_id(
        &self,
        name: &str,
        store_id: Uuid,
    ) -> Result<Option<CustomerGroup>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .customer_groups
            .values()
            .find(|g| g.name == name && g.store_id == store_id)
            .cloned())
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<CustomerGroup>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut groups: Vec<CustomerGroup> = tables
            .customer_groups
            .values()
            .filter(|g| g.store_id == store_id)
            .cloned()
            .collect();
        groups.sort_by_key(|g| (g.created_at, g.group_id));
        Ok(groups)
    }

    async fn save(&self, group: &CustomerGroup) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .await
            .customer_groups
            .insert(group.group_id, group.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.tables.lock().await.customer_groups.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.tables.lock().await.customers.get(&id).cloned())
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Customer>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut customers: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| c.store_id == store_id)
            .cloned()
            .collect();
        customers.sort_by_key(|c| (c.created_at, c.customer_id));
        Ok(customers)
    }

    async fn find_ids_by_group_id(&self, group_id: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let tables = self.tables.lock().await;
        let mut ids: Vec<Uuid> = tables
            .customers
            .values()
            .filter(|c| c.group_id == group_id)
            .map(|c| c.customer_id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .await
            .customers
            .insert(customer.customer_id, customer.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.tables.lock().await.customers.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MediaRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, RepositoryError> {
        Ok(self.tables.lock().await.media.get(&id).cloned())
    }

    async fn save(&self, media: &Media) -> Result<(), RepositoryError> {
        self.tables.lock().await.media.insert(media.media_id, media.clone());
        Ok(())
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryDatabase {
    async fn append(&self, log: &ActivityLog) -> Result<(), RepositoryError> {
        self.tables.lock().await.activity_logs.push(log.clone());
        Ok(())
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<ActivityLog>, RepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .activity_logs
            .iter()
            .rev()
            .filter(|log| log.store_id == store_id)
            .cloned()
            .collect())
    }
}
