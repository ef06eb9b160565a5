use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::Role;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Staff {
    pub staff_id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub cccd: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub note: Option<String>,
    pub role_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub salary_debt: i64,
    pub avatar_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Personal fields of a staff member, already checked by the caller.
#[derive(Debug, Clone, Default)]
pub struct StaffProfile {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub cccd: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Role and position ids resolved from their names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaffAssignment {
    pub role_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
}

impl Staff {
    pub fn new(
        profile: StaffProfile,
        password_hash: String,
        assignment: StaffAssignment,
        creator_id: Option<Uuid>,
        store_id: Uuid,
    ) -> Self {
        Self {
            staff_id: Uuid::new_v4(),
            name: profile.name,
            email: profile.email,
            password: password_hash,
            phone_number: profile.phone_number,
            cccd: profile.cccd,
            address: profile.address,
            sex: profile.sex,
            birthday: profile.birthday,
            note: profile.note,
            role_id: assignment.role_id,
            position_id: assignment.position_id,
            salary_debt: 0,
            avatar_id: None,
            creator_id,
            store_id,
            created_at: Utc::now(),
        }
    }
}

/// The authenticated staff member on whose behalf a service call runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub staff_id: Uuid,
    pub name: String,
    pub email: String,
    pub store_id: Uuid,
    pub role: Option<String>,
}

impl Caller {
    pub fn has_role(&self, role: Role) -> bool {
        self.role.as_deref() == Some(role.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryType {
    ShiftBased,
    Internship,
    Fixed,
}

impl SalaryType {
    pub const fn tag(&self) -> &'static str {
        match self {
            SalaryType::ShiftBased => "Shift-based pay",
            SalaryType::Internship => "Internship salary",
            SalaryType::Fixed => "Fixed salary",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        [SalaryType::ShiftBased, SalaryType::Internship, SalaryType::Fixed]
            .into_iter()
            .find(|kind| kind.tag() == tag)
    }
}

/// Salary configuration owned one-to-one by a staff member.
///
/// The type is kept as its raw tag so rows written with an unknown tag can
/// still be loaded.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffSalary {
    pub salary_id: Uuid,
    pub salary_type: String,
    pub salary: i64,
    pub staff_id: Uuid,
}

impl StaffSalary {
    pub fn new(staff_id: Uuid, salary_type: String, salary: i64) -> Self {
        Self {
            salary_id: Uuid::new_v4(),
            salary_type,
            salary,
            staff_id,
        }
    }

    pub fn kind(&self) -> Option<SalaryType> {
        SalaryType::from_tag(&self.salary_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_tags_parse_back() {
        assert_eq!(SalaryType::from_tag("Shift-based pay"), Some(SalaryType::ShiftBased));
        assert_eq!(SalaryType::from_tag("Internship salary"), Some(SalaryType::Internship));
        assert_eq!(SalaryType::from_tag("Fixed salary"), Some(SalaryType::Fixed));
        assert_eq!(SalaryType::from_tag("fixed salary"), None);
    }

    #[test]
    fn caller_role_check_is_exact() {
        let caller = Caller {
            staff_id: Uuid::new_v4(),
            name: "Lan".into(),
            email: "lan@store.vn".into(),
            store_id: Uuid::new_v4(),
            role: Some("OWNER".into()),
        };
        assert!(caller.has_role(Role::Owner));
        assert!(!caller.has_role(Role::Admin));
    }
}
