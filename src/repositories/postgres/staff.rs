use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::errors::RepositoryError;
use crate::models::role::{StaffPosition, StaffRole};
use crate::models::staff::{Staff, StaffSalary};
use crate::repositories::{
    StaffPositionRepository, StaffRepository, StaffRoleRepository, StaffSalaryRepository,
};

const STAFF_COLUMNS: &str = "staff_id, name, email, password, phone_number, cccd, address, sex, birthday, note, \
     role_id, position_id, salary_debt, avatar_id, creator_id, store_id, created_at";

pub struct PostgresStaffRepository {
    pool: PgPool,
}

impl PostgresStaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool, RepositoryError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM staffs WHERE {} = $1)", column);
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl StaffRepository for PostgresStaffRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Staff>, RepositoryError> {
        let sql = format!("SELECT {} FROM staffs WHERE staff_id = $1", STAFF_COLUMNS);
        sqlx::query_as::<_, Staff>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, RepositoryError> {
        let sql = format!("SELECT {} FROM staffs WHERE email = $1", STAFF_COLUMNS);
        sqlx::query_as::<_, Staff>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Staff>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM staffs WHERE store_id = $1 ORDER BY created_at, staff_id",
            STAFF_COLUMNS
        );
        sqlx::query_as::<_, Staff>(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        self.exists("email", email).await
    }

    async fn exists_by_cccd(&self, cccd: &str) -> Result<bool, RepositoryError> {
        self.exists("cccd", cccd).await
    }

    async fn exists_by_phone_number(&self, phone_number: &str) -> Result<bool, RepositoryError> {
        self.exists("phone_number", phone_number).await
    }

    async fn save(&self, staff: &Staff) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO staffs (
                staff_id, name, email, password, phone_number, cccd, address, sex, birthday, note,
                role_id, position_id, salary_debt, avatar_id, creator_id, store_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (staff_id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                password = EXCLUDED.password,
                phone_number = EXCLUDED.phone_number,
                cccd = EXCLUDED.cccd,
                address = EXCLUDED.address,
                sex = EXCLUDED.sex,
                birthday = EXCLUDED.birthday,
                note = EXCLUDED.note,
                role_id = EXCLUDED.role_id,
                position_id = EXCLUDED.position_id,
                salary_debt = EXCLUDED.salary_debt,
                avatar_id = EXCLUDED.avatar_id
            "#,
        )
        .bind(staff.staff_id)
        .bind(&staff.name)
        .bind(&staff.email)
        .bind(&staff.password)
        .bind(&staff.phone_number)
        .bind(&staff.cccd)
        .bind(&staff.address)
        .bind(&staff.sex)
        .bind(staff.birthday)
        .bind(&staff.note)
        .bind(staff.role_id)
        .bind(staff.position_id)
        .bind(staff.salary_debt)
        .bind(staff.avatar_id)
        .bind(staff.creator_id)
        .bind(staff.store_id)
        .bind(staff.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM staffs WHERE staff_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

pub struct PostgresStaffRoleRepository {
    pool: PgPool,
}

impl PostgresStaffRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRoleRepository for PostgresStaffRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffRole>, RepositoryError> {
        sqlx::query_as::<_, StaffRole>("SELECT role_id, name, store_id FROM staff_roles WHERE role_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_name_and_store_id(
        &self,
        name: &str,
        store_id: Uuid,
    ) -> Result<Option<StaffRole>, RepositoryError> {
        sqlx::query_as::<_, StaffRole>(
            "SELECT role_id, name, store_id FROM staff_roles WHERE name = $1 AND store_id = $2",
        )
        .bind(name)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn save(&self, role: &StaffRole) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO staff_roles (role_id, name, store_id) VALUES ($1, $2, $3)
            ON CONFLICT (role_id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(role.role_id)
        .bind(&role.name)
        .bind(role.store_id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}

pub struct PostgresStaffPositionRepository {
    pool: PgPool,
}

impl PostgresStaffPositionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffPositionRepository for PostgresStaffPositionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffPosition>, RepositoryError> {
        sqlx::query_as::<_, StaffPosition>("SELECT position_id, name FROM staff_positions WHERE position_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StaffPosition>, RepositoryError> {
        sqlx::query_as::<_, StaffPosition>("SELECT position_id, name FROM staff_positions WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn save(&self, position: &StaffPosition) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO staff_positions (position_id, name) VALUES ($1, $2)
            ON CONFLICT (position_id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(position.position_id)
        .bind(&position.name)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}

pub struct PostgresStaffSalaryRepository {
    pool: PgPool,
}

impl PostgresStaffSalaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffSalaryRepository for PostgresStaffSalaryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffSalary>, RepositoryError> {
        sqlx::query_as::<_, StaffSalary>(
            "SELECT salary_id, salary_type, salary, staff_id FROM staff_salaries WHERE salary_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_staff_id(&self, staff_id: Uuid) -> Result<Option<StaffSalary>, RepositoryError> {
        sqlx::query_as::<_, StaffSalary>(
            "SELECT salary_id, salary_type, salary, staff_id FROM staff_salaries WHERE staff_id = $1",
        )
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn save(&self, salary: &StaffSalary) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO staff_salaries (salary_id, salary_type, salary, staff_id) VALUES ($1, $2, $3, $4)
            ON CONFLICT (salary_id) DO UPDATE SET
                salary_type = EXCLUDED.salary_type,
                salary = EXCLUDED.salary
            "#,
        )
        .bind(salary.salary_id)
        .bind(&salary.salary_type)
        .bind(salary.salary)
        .bind(salary.staff_id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }
}
