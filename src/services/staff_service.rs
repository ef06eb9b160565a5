use chrono::{Datelike, Duration, Months, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::activity_log::ActivityAction;
use crate::models::role::{Role, StaffPosition, StaffRole};
use crate::models::staff::{Caller, Staff, StaffAssignment};
use crate::payload::staff::{StaffRequest, StaffResponse};
use crate::repositories::{
    AttendanceRepository, MediaRepository, Repositories, StaffPositionRepository, StaffRepository,
    StaffRoleRepository,
};
use crate::services::activity_log_service::ActivityLogService;
use crate::services::staff_salary_service::{compute_salary_debt, StaffSalaryService};
use crate::services::upload_media;
use crate::storage::{FileStorage, UploadedFile};
use crate::utils::password::hash_password;
use crate::utils::validation::{is_future_date, is_valid_cccd, is_valid_phone_number, validate_payload};

#[derive(Clone)]
pub struct StaffService {
    staffs: Arc<dyn StaffRepository>,
    roles: Arc<dyn StaffRoleRepository>,
    positions: Arc<dyn StaffPositionRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    media: Arc<dyn MediaRepository>,
    salaries: StaffSalaryService,
    activity_logs: ActivityLogService,
    files: Arc<dyn FileStorage>,
}

/// First day of the month containing `today`, and first day of the next one.
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today - Duration::days(i64::from(today.day0()));
    let until = first.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
    (first, until)
}

impl StaffService {
    pub fn new(repos: &Repositories, files: Arc<dyn FileStorage>) -> Self {
        Self {
            staffs: repos.staffs.clone(),
            roles: repos.roles.clone(),
            positions: repos.positions.clone(),
            attendance: repos.attendance.clone(),
            media: repos.media.clone(),
            salaries: StaffSalaryService::new(repos.salaries.clone()),
            activity_logs: ActivityLogService::new(repos.activity_logs.clone()),
            files,
        }
    }

    pub async fn create_staff(
        &self,
        caller: &Caller,
        request: StaffRequest,
        file: Option<UploadedFile>,
    ) -> Result<StaffResponse, AppError> {
        if !caller.has_role(Role::Admin) && !caller.has_role(Role::Owner) {
            return Err(AppError::Forbidden("Only admin can create staff".to_string()));
        }

        if self.staffs.exists_by_email(&request.email).await? {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }

        let role = match request.role.as_deref() {
            Some(name) => Some(self.find_role(name, caller.store_id).await?),
            None => None,
        };

        validate_payload(&request)?;
        let password = request
            .password
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Password must be at least 6 characters".to_string()))?;

        if request.birthday.is_some_and(is_future_date) {
            return Err(AppError::BadRequest("Birthday is invalid".to_string()));
        }

        if let Some(cccd) = request.cccd.as_deref() {
            self.check_cccd(cccd).await?;
        }
        if let Some(phone_number) = request.phone_number.as_deref() {
            self.check_phone_number(phone_number).await?;
        }

        let position = self.find_position(&request.position).await?;

        let mut staff = Staff::new(
            request.profile(),
            hash_password(password)?,
            StaffAssignment {
                role_id: role.map(|r| r.role_id),
                position_id: Some(position.position_id),
            },
            Some(caller.staff_id),
            caller.store_id,
        );
        staff.salary_debt = request.salary_debt.unwrap_or_default();

        if let Some(file) = file {
            let avatar = upload_media(self.files.as_ref(), self.media.as_ref(), file).await?;
            staff.avatar_id = Some(avatar.media_id);
        }

        self.staffs.save(&staff).await?;
        if let Some(salary) = &request.staff_salary {
            self.salaries.create(staff.staff_id, salary).await?;
        }

        self.activity_logs
            .save(ActivityAction::Create, "Create new staff", caller)
            .await?;
        log::info!("Staff {} created by {}", staff.staff_id, caller.email);

        self.to_response(&staff).await
    }

    /// Staff of the caller's store that the caller created.
    pub async fn get_all_staffs(&self, caller: &Caller) -> Result<Vec<StaffResponse>, AppError> {
        let staffs = self.staffs.find_by_store_id(caller.store_id).await?;
        let mut responses = Vec::new();
        for staff in staffs
            .iter()
            .filter(|s| s.creator_id == Some(caller.staff_id))
        {
            responses.push(self.to_response(staff).await?);
        }
        Ok(responses)
    }

    pub async fn get_staff_by_id(&self, id: Uuid) -> Result<StaffResponse, AppError> {
        let staff = self.find_staff(id).await?;
        self.to_response(&staff).await
    }

    pub async fn update_staff(
        &self,
        caller: &Caller,
        id: Uuid,
        request: StaffRequest,
        file: Option<UploadedFile>,
    ) -> Result<StaffResponse, AppError> {
        let mut staff = self.find_staff(id).await?;

        let role = match request.role.as_deref() {
            Some(name) => Some(self.find_role(name, staff.store_id).await?),
            None => None,
        };

        if request.birthday.is_some_and(is_future_date) {
            return Err(AppError::BadRequest("Birthday is invalid".to_string()));
        }

        if let Some(requested) = request.role.as_deref() {
            let current = self.role_name(staff.role_id).await?;
            if current.as_deref() != Some(requested) && !caller.has_role(Role::Admin) {
                return Err(AppError::Forbidden("Only admin can change staff role".to_string()));
            }
        }

        validate_payload(&request)?;

        staff.name = request.name.clone();
        staff.address = request.address.clone();
        staff.note = request.note.clone();
        staff.sex = request.sex.clone();
        staff.birthday = request.birthday;
        staff.position_id = Some(self.find_position(&request.position).await?.position_id);
        staff.salary_debt = request.salary_debt.unwrap_or_default();
        staff.role_id = role.map(|r| r.role_id);

        if staff.cccd != request.cccd {
            if let Some(cccd) = request.cccd.as_deref() {
                self.check_cccd(cccd).await?;
            }
            staff.cccd = request.cccd.clone();
        }
        if staff.phone_number != request.phone_number {
            if let Some(phone_number) = request.phone_number.as_deref() {
                self.check_phone_number(phone_number).await?;
            }
            staff.phone_number = request.phone_number.clone();
        }

        if let Some(salary_request) = &request.staff_salary {
            match self.salaries.find_by_staff(staff.staff_id).await? {
                Some(existing) => {
                    self.salaries
                        .update_staff_salary(existing.salary_id, salary_request)
                        .await?;
                }
                None => {
                    self.salaries.create(staff.staff_id, salary_request).await?;
                }
            }
        }

        // an update without a file drops the current avatar
        staff.avatar_id = match file {
            Some(file) => Some(
                upload_media(self.files.as_ref(), self.media.as_ref(), file)
                    .await?
                    .media_id,
            ),
            None => None,
        };

        self.staffs.save(&staff).await?;
        self.activity_logs
            .save(ActivityAction::Update, format!("Update staff with id {}", id), caller)
            .await?;

        self.to_response(&staff).await
    }

    pub async fn delete_staff(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        let staff = self.find_staff(id).await?;

        let purged = self.attendance.delete_by_staff_id(staff.staff_id).await?;
        self.staffs.delete(staff.staff_id).await?;
        log::info!("Staff {} deleted with {} attendance records", id, purged);

        self.activity_logs
            .save(ActivityAction::Delete, format!("Delete staff with id {}", id), caller)
            .await?;
        Ok(())
    }

    /// Salary owed for the current calendar month. The result is stored on
    /// the staff record as its salary debt.
    pub async fn get_staff_salary(&self, id: Uuid) -> Result<i64, AppError> {
        self.compute_staff_salary(id, Utc::now().date_naive()).await
    }

    async fn compute_staff_salary(&self, id: Uuid, today: NaiveDate) -> Result<i64, AppError> {
        let mut staff = self.find_staff(id).await?;
        let salary = self
            .salaries
            .find_by_staff(staff.staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Salary of staff {} not found", id)))?;

        let (from, until) = month_bounds(today);
        let records = self
            .attendance
            .find_by_staff_id_between(staff.staff_id, from, until)
            .await?;

        match compute_salary_debt(&salary, &records)? {
            Some(debt) => {
                staff.salary_debt = debt;
                self.staffs.save(&staff).await?;
                Ok(debt)
            }
            None => {
                log::warn!(
                    "Unrecognized salary type {:?} for staff {}",
                    salary.salary_type,
                    id
                );
                Ok(0)
            }
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Staff, AppError> {
        self.staffs
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff with email {} not found", email)))
    }

    /// Resolves an authenticated email to the caller identity used by every
    /// other service call.
    pub async fn get_authorized_staff(&self, email: &str) -> Result<Caller, AppError> {
        let staff = self.find_by_email(email).await?;
        Ok(Caller {
            role: self.role_name(staff.role_id).await?,
            staff_id: staff.staff_id,
            name: staff.name,
            email: staff.email,
            store_id: staff.store_id,
        })
    }

    async fn find_staff(&self, id: Uuid) -> Result<Staff, AppError> {
        self.staffs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Staff with id {} not found", id)))
    }

    async fn find_role(&self, name: &str, store_id: Uuid) -> Result<StaffRole, AppError> {
        self.roles
            .find_by_name_and_store_id(name, store_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role {} is invalid", name)))
    }

    async fn find_position(&self, name: &str) -> Result<StaffPosition, AppError> {
        self.positions
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Position {} not found", name)))
    }

    async fn role_name(&self, role_id: Option<Uuid>) -> Result<Option<String>, AppError> {
        match role_id {
            Some(id) => Ok(self.roles.find_by_id(id).await?.map(|r| r.name)),
            None => Ok(None),
        }
    }

    async fn check_cccd(&self, cccd: &str) -> Result<(), AppError> {
        if !is_valid_cccd(cccd) {
            return Err(AppError::BadRequest("CCCD is invalid".to_string()));
        }
        if self.staffs.exists_by_cccd(cccd).await? {
            return Err(AppError::Conflict("CCCD already in use".to_string()));
        }
        Ok(())
    }

    async fn check_phone_number(&self, phone_number: &str) -> Result<(), AppError> {
        if !is_valid_phone_number(phone_number) {
            return Err(AppError::BadRequest("Phone number is invalid".to_string()));
        }
        if self.staffs.exists_by_phone_number(phone_number).await? {
            return Err(AppError::Conflict("Phone number already in use".to_string()));
        }
        Ok(())
    }

    async fn to_response(&self, staff: &Staff) -> Result<StaffResponse, AppError> {
        let position = match staff.position_id {
            Some(id) => self.positions.find_by_id(id).await?.map(|p| p.name),
            None => None,
        };
        let avatar = match staff.avatar_id {
            Some(id) => self.media.find_by_id(id).await?.map(|m| m.url),
            None => None,
        };

        Ok(StaffResponse {
            id: staff.staff_id,
            name: staff.name.clone(),
            email: staff.email.clone(),
            cccd: staff.cccd.clone(),
            phone_number: staff.phone_number.clone(),
            position,
            salary_debt: staff.salary_debt,
            sex: staff.sex.clone(),
            address: staff.address.clone(),
            note: staff.note.clone(),
            birthday: staff.birthday,
            created_at: staff.created_at,
            avatar,
            role: self.role_name(staff.role_id).await?,
            creator: staff.creator_id,
            staff_salary: self.salaries.find_by_staff(staff.staff_id).await?,
        })
    }
}
