use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity_log::ActivityAction;
use crate::models::shift::{Shift, ShiftAttendanceRecord};
use crate::models::staff::Caller;
use crate::payload::shift::{AttendanceRequest, ShiftRequest};
use crate::repositories::{AttendanceRepository, Repositories, ShiftRepository, StaffRepository};
use crate::services::activity_log_service::ActivityLogService;
use crate::utils::validation::validate_payload;

#[derive(Clone)]
pub struct ShiftService {
    shifts: Arc<dyn ShiftRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    staffs: Arc<dyn StaffRepository>,
    activity_logs: ActivityLogService,
}

impl ShiftService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            shifts: repos.shifts.clone(),
            attendance: repos.attendance.clone(),
            staffs: repos.staffs.clone(),
            activity_logs: ActivityLogService::new(repos.activity_logs.clone()),
        }
    }

    pub async fn create_shift(&self, caller: &Caller, request: ShiftRequest) -> Result<Shift, AppError> {
        validate_payload(&request)?;

        let shift = Shift::new(request.name, request.start_time, request.end_time, caller.store_id);
        self.shifts.save(&shift).await?;
        self.activity_logs
            .save(ActivityAction::Create, "Create new shift", caller)
            .await?;
        Ok(shift)
    }

    pub async fn get_all_shifts(&self, caller: &Caller) -> Result<Vec<Shift>, AppError> {
        Ok(self.shifts.find_by_store_id(caller.store_id).await?)
    }

    /// Removes the shift together with every attendance record taken on it.
    pub async fn delete_shift(&self, id: Uuid) -> Result<(), AppError> {
        let shift = self.find_shift(id).await?;
        let purged = self.attendance.delete_by_shift_id(shift.shift_id).await?;
        self.shifts.delete(shift.shift_id).await?;
        log::info!("Shift {} deleted with {} attendance records", id, purged);
        Ok(())
    }

    pub async fn record_attendance(
        &self,
        caller: &Caller,
        shift_id: Uuid,
        request: AttendanceRequest,
    ) -> Result<ShiftAttendanceRecord, AppError> {
        validate_payload(&request)?;

        let shift = self
            .shifts
            .find_by_id(shift_id)
            .await?
            .filter(|s| s.store_id == caller.store_id)
            .ok_or_else(|| AppError::NotFound(format!("Shift with id {} not found", shift_id)))?;
        let staff = self
            .staffs
            .find_by_id(request.staff_id)
            .await?
            .filter(|s| s.store_id == caller.store_id)
            .ok_or_else(|| AppError::NotFound(format!("Staff with id {} not found", request.staff_id)))?;

        let record = ShiftAttendanceRecord::new(
            shift.shift_id,
            staff.staff_id,
            request.date,
            request.has_attend,
            request.bonus_salary_list,
            request.punish_salary_list,
        );
        self.attendance.save(&record).await?;
        Ok(record)
    }

    pub async fn get_staff_attendance(&self, staff_id: Uuid) -> Result<Vec<ShiftAttendanceRecord>, AppError> {
        Ok(self.attendance.find_by_staff_id(staff_id).await?)
    }

    async fn find_shift(&self, id: Uuid) -> Result<Shift, AppError> {
        self.shifts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shift with id {} not found", id)))
    }
}
