use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::staff::{StaffProfile, StaffSalary};

#[derive(Deserialize, Serialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffSalaryRequest {
    pub salary_type: String,
    #[validate(range(min = 0, max = 1_000_000_000_000, message = "Salary must be between 0 and 1000000000000"))]
    pub salary: i64,
}

#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub cccd: Option<String>,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub note: Option<String>,
    pub role: Option<String>,
    pub position: String,
    pub salary_debt: Option<i64>,
    #[validate]
    pub staff_salary: Option<StaffSalaryRequest>,
}

impl StaffRequest {
    pub fn profile(&self) -> StaffProfile {
        StaffProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            cccd: self.cccd.clone(),
            address: self.address.clone(),
            sex: self.sex.clone(),
            birthday: self.birthday,
            note: self.note.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cccd: Option<String>,
    pub phone_number: Option<String>,
    pub position: Option<String>,
    pub salary_debt: i64,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub avatar: Option<String>,
    pub role: Option<String>,
    pub creator: Option<Uuid>,
    pub staff_salary: Option<StaffSalary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffSalaryResponse {
    pub staff_id: Uuid,
    pub salary_debt: i64,
}
