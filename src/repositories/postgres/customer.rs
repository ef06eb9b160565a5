use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::errors::RepositoryError;
use crate::models::customer::Customer;
use crate::models::customer_group::CustomerGroup;
use crate::repositories::{CustomerGroupRepository, CustomerRepository};

const GROUP_COLUMNS: &str = "group_id, name, description, creator_id, store_id, created_at";

const CUSTOMER_COLUMNS: &str = "customer_id, name, email, phone_number, address, sex, birthday, description, \
     status, group_id, creator_id, image_id, store_id, created_at";

pub struct PostgresCustomerGroupRepository {
    pool: PgPool,
}

impl PostgresCustomerGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerGroupRepository for PostgresCustomerGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerGroup>, RepositoryError> {
        let sql = format!("SELECT {} FROM customer_groups WHERE group_id = $1", GROUP_COLUMNS);
        sqlx::query_as::<_, CustomerGroup>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_name_and_store_id(
        &self,
        name: &str,
        store_id: Uuid,
    ) -> Result<Option<CustomerGroup>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM customer_groups WHERE name = $1 AND store_id = $2",
            GROUP_COLUMNS
        );
        sqlx::query_as::<_, CustomerGroup>(&sql)
            .bind(name)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<CustomerGroup>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM customer_groups WHERE store_id = $1 ORDER BY created_at, group_id",
            GROUP_COLUMNS
        );
        sqlx::query_as::<_, CustomerGroup>(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn save(&self, group: &CustomerGroup) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO customer_groups (group_id, name, description, creator_id, store_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (group_id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description
            "#,
        )
        .bind(group.group_id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.creator_id)
        .bind(group.store_id)
        .bind(group.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM customer_groups WHERE group_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!("SELECT {} FROM customers WHERE customer_id = $1", CUSTOMER_COLUMNS);
        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM customers WHERE store_id = $1 ORDER BY created_at, customer_id",
            CUSTOMER_COLUMNS
        );
        sqlx::query_as::<_, Customer>(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_ids_by_group_id(&self, group_id: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        sqlx::query_scalar::<_, Uuid>("SELECT customer_id FROM customers WHERE group_id = $1 ORDER BY customer_id")
            .bind(group_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                customer_id, name, email, phone_number, address, sex, birthday, description,
                status, group_id, creator_id, image_id, store_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (customer_id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone_number = EXCLUDED.phone_number,
                address = EXCLUDED.address,
                sex = EXCLUDED.sex,
                birthday = EXCLUDED.birthday,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                group_id = EXCLUDED.group_id,
                image_id = EXCLUDED.image_id
            "#,
        )
        .bind(customer.customer_id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(&customer.sex)
        .bind(customer.birthday)
        .bind(&customer.description)
        .bind(&customer.status)
        .bind(customer.group_id)
        .bind(customer.creator_id)
        .bind(customer.image_id)
        .bind(customer.store_id)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
