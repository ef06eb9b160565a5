//! `sqlx` implementations of the repository traits against the schema in
//! `migrations/`.

mod activity_log;
mod customer;
mod media;
mod shift;
mod staff;
mod store;

pub use activity_log::PostgresActivityLogRepository;
pub use customer::{PostgresCustomerGroupRepository, PostgresCustomerRepository};
pub use shift::{PostgresAttendanceRepository, PostgresShiftRepository};
pub use media::PostgresMediaRepository;
pub use staff::{
    PostgresStaffPositionRepository, PostgresStaffRepository, PostgresStaffRoleRepository,
    PostgresStaffSalaryRepository,
};
pub use store::PostgresStoreRepository;

use crate::errors::RepositoryError;

fn db_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}
