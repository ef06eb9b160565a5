use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::shift::ShiftAttendanceRecord;
use crate::models::staff::{SalaryType, StaffSalary};
use crate::payload::staff::StaffSalaryRequest;
use crate::repositories::StaffSalaryRepository;

#[derive(Clone)]
pub struct StaffSalaryService {
    salaries: Arc<dyn StaffSalaryRepository>,
}

impl StaffSalaryService {
    pub fn new(salaries: Arc<dyn StaffSalaryRepository>) -> Self {
        Self { salaries }
    }

    pub async fn create(&self, staff_id: Uuid, request: &StaffSalaryRequest) -> Result<StaffSalary, AppError> {
        let salary = StaffSalary::new(staff_id, request.salary_type.clone(), request.salary);
        self.salaries.save(&salary).await?;
        Ok(salary)
    }

    pub async fn update_staff_salary(
        &self,
        salary_id: Uuid,
        request: &StaffSalaryRequest,
    ) -> Result<StaffSalary, AppError> {
        let mut salary = self
            .salaries
            .find_by_id(salary_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff salary {} not found", salary_id)))?;
        salary.salary_type = request.salary_type.clone();
        salary.salary = request.salary;
        self.salaries.save(&salary).await?;
        Ok(salary)
    }

    pub async fn find_by_staff(&self, staff_id: Uuid) -> Result<Option<StaffSalary>, AppError> {
        Ok(self.salaries.find_by_staff_id(staff_id).await?)
    }
}

/// Salary owed for the given attendance records, or `Ok(None)` when the
/// salary type tag is not one of the known ones.
///
/// Shift-based pay multiplies the base amount by the number of attended
/// records; the other types pay the base amount once. Bonuses and
/// punishments on every record are added on top either way. A total that
/// does not fit in an `i64` is rejected.
pub fn compute_salary_debt(
    salary: &StaffSalary,
    records: &[ShiftAttendanceRecord],
) -> Result<Option<i64>, AppError> {
    let kind = match salary.kind() {
        Some(kind) => kind,
        None => return Ok(None),
    };
    let base = match kind {
        SalaryType::ShiftBased => {
            let attended = records.iter().filter(|r| r.has_attend).count() as i64;
            salary.salary.checked_mul(attended)
        }
        SalaryType::Internship | SalaryType::Fixed => Some(salary.salary),
    };
    records
        .iter()
        .try_fold(base.ok_or_else(salary_overflow)?, |total, record| {
            record
                .adjustment()
                .and_then(|adjustment| total.checked_add(adjustment))
                .ok_or_else(salary_overflow)
        })
        .map(Some)
}

fn salary_overflow() -> AppError {
    AppError::BadRequest("Salary overflow".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shift::{StaffBonusSalary, StaffPunishSalary};
    use crate::repositories::memory::InMemoryDatabase;
    use chrono::NaiveDate;

    fn record(has_attend: bool, bonus: &[(i64, i64)], punish: &[(i64, i64)]) -> ShiftAttendanceRecord {
        ShiftAttendanceRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            has_attend,
            bonus
                .iter()
                .map(|&(value, multiply)| StaffBonusSalary { name: "bonus".into(), value, multiply })
                .collect(),
            punish
                .iter()
                .map(|&(value, multiply)| StaffPunishSalary { name: "late".into(), value, multiply })
                .collect(),
        )
    }

    fn salary(tag: &str, amount: i64) -> StaffSalary {
        StaffSalary::new(Uuid::new_v4(), tag.into(), amount)
    }

    #[test]
    fn shift_based_counts_attended_records() {
        let records = vec![record(true, &[(50, 1)], &[]), record(true, &[], &[(20, 1)])];
        assert_eq!(compute_salary_debt(&salary("Shift-based pay", 100), &records).unwrap(), Some(230));
    }

    #[test]
    fn shift_based_skips_missed_shifts_but_keeps_their_adjustments() {
        let records = vec![record(true, &[], &[]), record(false, &[(10, 3)], &[(5, 2)])];
        assert_eq!(compute_salary_debt(&salary("Shift-based pay", 100), &records).unwrap(), Some(120));
    }

    #[test]
    fn fixed_and_internship_ignore_attendance() {
        let records = vec![record(false, &[(50, 2)], &[]), record(true, &[], &[(30, 1)])];
        assert_eq!(compute_salary_debt(&salary("Fixed salary", 1000), &records).unwrap(), Some(1070));
        assert_eq!(compute_salary_debt(&salary("Internship salary", 400), &records).unwrap(), Some(470));
        assert_eq!(compute_salary_debt(&salary("Fixed salary", 1000), &[]).unwrap(), Some(1000));
    }

    #[test]
    fn unknown_tag_yields_none() {
        assert_eq!(compute_salary_debt(&salary("Commission", 100), &[record(true, &[], &[])]).unwrap(), None);
    }

    #[test]
    fn oversized_amounts_are_rejected_instead_of_wrapping() {
        let huge_bonus = vec![record(true, &[(i64::MAX, 2)], &[])];
        assert!(matches!(
            compute_salary_debt(&salary("Fixed salary", 100), &huge_bonus),
            Err(AppError::BadRequest(_))
        ));

        let near_limit = vec![record(true, &[(i64::MAX - 50, 1)], &[])];
        assert!(matches!(
            compute_salary_debt(&salary("Fixed salary", 100), &near_limit),
            Err(AppError::BadRequest(_))
        ));

        let shifts = vec![record(true, &[], &[]), record(true, &[], &[])];
        assert!(matches!(
            compute_salary_debt(&salary("Shift-based pay", i64::MAX), &shifts),
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn update_overwrites_type_and_amount() {
        let service = StaffSalaryService::new(Arc::new(InMemoryDatabase::new()));
        let staff_id = Uuid::new_v4();
        let created = service
            .create(staff_id, &StaffSalaryRequest { salary_type: "Fixed salary".into(), salary: 900 })
            .await
            .unwrap();

        let updated = service
            .update_staff_salary(
                created.salary_id,
                &StaffSalaryRequest { salary_type: "Shift-based pay".into(), salary: 120 },
            )
            .await
            .unwrap();

        assert_eq!(updated.salary_id, created.salary_id);
        assert_eq!(service.find_by_staff(staff_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_of_missing_salary_is_not_found() {
        let service = StaffSalaryService::new(Arc::new(InMemoryDatabase::new()));
        let result = service
            .update_staff_salary(Uuid::new_v4(), &StaffSalaryRequest { salary_type: "Fixed salary".into(), salary: 1 })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
