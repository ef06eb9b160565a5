use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub shift_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    pub fn new(name: String, start_time: NaiveTime, end_time: NaiveTime, store_id: Uuid) -> Self {
        Self {
            shift_id: Uuid::new_v4(),
            name,
            start_time,
            end_time,
            store_id,
            created_at: Utc::now(),
        }
    }
}

/// A bonus granted on an attendance record, worth `value * multiply`.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffBonusSalary {
    pub name: String,
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub value: i64,
    #[validate(range(min = 0, max = 1_000))]
    pub multiply: i64,
}

/// A deduction on an attendance record, worth `value * multiply`.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffPunishSalary {
    pub name: String,
    #[validate(range(min = 0, max = 1_000_000_000))]
    pub value: i64,
    #[validate(range(min = 0, max = 1_000))]
    pub multiply: i64,
}

impl StaffBonusSalary {
    /// `None` when the product does not fit in an `i64`.
    pub fn amount(&self) -> Option<i64> {
        self.value.checked_mul(self.multiply)
    }
}

impl StaffPunishSalary {
    /// `None` when the product does not fit in an `i64`.
    pub fn amount(&self) -> Option<i64> {
        self.value.checked_mul(self.multiply)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAttendanceRecord {
    pub record_id: Uuid,
    pub shift_id: Uuid,
    pub staff_id: Uuid,
    pub date: NaiveDate,
    pub has_attend: bool,
    pub bonus_salary_list: Vec<StaffBonusSalary>,
    pub punish_salary_list: Vec<StaffPunishSalary>,
}

impl ShiftAttendanceRecord {
    pub fn new(
        shift_id: Uuid,
        staff_id: Uuid,
        date: NaiveDate,
        has_attend: bool,
        bonus_salary_list: Vec<StaffBonusSalary>,
        punish_salary_list: Vec<StaffPunishSalary>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            shift_id,
            staff_id,
            date,
            has_attend,
            bonus_salary_list,
            punish_salary_list,
        }
    }

    /// Bonuses minus punishments on this record, or `None` on overflow.
    pub fn adjustment(&self) -> Option<i64> {
        let bonus = self
            .bonus_salary_list
            .iter()
            .try_fold(0i64, |acc, b| acc.checked_add(b.amount()?))?;
        let punish = self
            .punish_salary_list
            .iter()
            .try_fold(0i64, |acc, p| acc.checked_add(p.amount()?))?;
        bonus.checked_sub(punish)
    }
}
