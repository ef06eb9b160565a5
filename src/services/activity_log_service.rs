use std::sync::Arc;

use crate::errors::AppError;
use crate::models::activity_log::{ActivityAction, ActivityLog};
use crate::models::staff::Caller;
use crate::repositories::ActivityLogRepository;

#[derive(Clone)]
pub struct ActivityLogService {
    logs: Arc<dyn ActivityLogRepository>,
}

impl ActivityLogService {
    pub fn new(logs: Arc<dyn ActivityLogRepository>) -> Self {
        Self { logs }
    }

    /// Appends an audit entry attributed to the caller.
    pub async fn save(
        &self,
        action: ActivityAction,
        description: impl Into<String>,
        actor: &Caller,
    ) -> Result<ActivityLog, AppError> {
        let entry = ActivityLog::new(action, description.into(), actor.name.clone(), actor.store_id);
        self.logs.append(&entry).await?;
        Ok(entry)
    }

    pub async fn get_all(&self, caller: &Caller) -> Result<Vec<ActivityLog>, AppError> {
        Ok(self.logs.find_by_store_id(caller.store_id).await?)
    }
}
