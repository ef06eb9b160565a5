use std::sync::Arc;

use crate::repositories::Repositories;
use crate::services::activity_log_service::ActivityLogService;
use crate::services::auth_service::AuthService;
use crate::services::customer_group_service::CustomerGroupService;
use crate::services::customer_service::CustomerService;
use crate::services::shift_service::ShiftService;
use crate::services::staff_service::StaffService;
use crate::storage::FileStorage;

/// Services shared by every worker, cloned into `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub staff: StaffService,
    pub customers: CustomerService,
    pub customer_groups: CustomerGroupService,
    pub shifts: ShiftService,
    pub activity_logs: ActivityLogService,
    pub files: Arc<dyn FileStorage>,
}

impl AppState {
    pub fn new(repos: Repositories, files: Arc<dyn FileStorage>, jwt_secret: String) -> Self {
        let staff = StaffService::new(&repos, files.clone());
        Self {
            auth: AuthService::new(&repos, staff.clone(), jwt_secret),
            customers: CustomerService::new(&repos, files.clone()),
            customer_groups: CustomerGroupService::new(&repos),
            shifts: ShiftService::new(&repos),
            activity_logs: ActivityLogService::new(repos.activity_logs.clone()),
            staff,
            files,
        }
    }
}
