use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::shift::{StaffBonusSalary, StaffPunishSalary};

#[derive(Deserialize, Serialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_shift_times"))]
pub struct ShiftRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

fn validate_shift_times(shift: &ShiftRequest) -> Result<(), ValidationError> {
    if shift.end_time <= shift.start_time {
        let mut err = ValidationError::new("shift_times");
        err.message = Some("Shift must end after it starts".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Deserialize, Serialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    pub staff_id: Uuid,
    pub date: NaiveDate,
    pub has_attend: bool,
    #[serde(default)]
    #[validate]
    pub bonus_salary_list: Vec<StaffBonusSalary>,
    #[serde(default)]
    #[validate]
    pub punish_salary_list: Vec<StaffPunishSalary>,
}
