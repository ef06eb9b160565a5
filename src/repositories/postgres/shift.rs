use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use super::db_error;
use crate::errors::RepositoryError;
use crate::models::shift::{Shift, ShiftAttendanceRecord, StaffBonusSalary, StaffPunishSalary};
use crate::repositories::{AttendanceRepository, ShiftRepository};

pub struct PostgresShiftRepository {
    pool: PgPool,
}

impl PostgresShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftRepository for PostgresShiftRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, RepositoryError> {
        sqlx::query_as::<_, Shift>(
            "SELECT shift_id, name, start_time, end_time, store_id, created_at FROM shifts WHERE shift_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_store_id(&self, store_id: Uuid) -> Result<Vec<Shift>, RepositoryError> {
        sqlx::query_as::<_, Shift>(
            r#"
            SELECT shift_id, name, start_time, end_time, store_id, created_at
            FROM shifts
            WHERE store_id = $1
            ORDER BY start_time, shift_id
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn save(&self, shift: &Shift) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO shifts (shift_id, name, start_time, end_time, store_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (shift_id) DO UPDATE SET
                name = EXCLUDED.name,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time
            "#,
        )
        .bind(shift.shift_id)
        .bind(&shift.name)
        .bind(shift.start_time)
        .bind(shift.end_time)
        .bind(shift.store_id)
        .bind(shift.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shifts WHERE shift_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    record_id: Uuid,
    shift_id: Uuid,
    staff_id: Uuid,
    date: NaiveDate,
    has_attend: bool,
}

#[derive(sqlx::FromRow)]
struct AdjustmentRow {
    record_id: Uuid,
    name: String,
    value: i64,
    multiply: i64,
}

pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_adjustments(
        &self,
        table: &str,
        record_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<AdjustmentRow>>, RepositoryError> {
        let sql = format!(
            "SELECT record_id, name, value, multiply FROM {} WHERE record_id = ANY($1) ORDER BY record_id, ordinal",
            table
        );
        let rows = sqlx::query_as::<_, AdjustmentRow>(&sql)
            .bind(record_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let mut grouped: HashMap<Uuid, Vec<AdjustmentRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.record_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Attach bonus and punishment lists to the loaded record rows.
    async fn hydrate(&self, rows: Vec<RecordRow>) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.record_id).collect();
        let mut bonuses = self.fetch_adjustments("staff_bonus_salaries", &ids).await?;
        let mut punishments = self.fetch_adjustments("staff_punish_salaries", &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| ShiftAttendanceRecord {
                bonus_salary_list: bonuses
                    .remove(&row.record_id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|b| StaffBonusSalary { name: b.name, value: b.value, multiply: b.multiply })
                    .collect(),
                punish_salary_list: punishments
                    .remove(&row.record_id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|p| StaffPunishSalary { name: p.name, value: p.value, multiply: p.multiply })
                    .collect(),
                record_id: row.record_id,
                shift_id: row.shift_id,
                staff_id: row.staff_id,
                date: row.date,
                has_attend: row.has_attend,
            })
            .collect())
    }

    async fn insert_adjustment(
        tx: &mut Transaction<'_, Postgres>,
        table: &str,
        record_id: Uuid,
        ordinal: usize,
        name: &str,
        value: i64,
        multiply: i64,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (record_id, ordinal, name, value, multiply) VALUES ($1, $2, $3, $4, $5)",
            table
        );
        sqlx::query(&sql)
            .bind(record_id)
            .bind(ordinal as i32)
            .bind(name)
            .bind(value)
            .bind(multiply)
            .execute(&mut **tx)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn save(&self, record: &ShiftAttendanceRecord) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO shift_attendance_records (record_id, shift_id, staff_id, date, has_attend)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (record_id) DO UPDATE SET
                date = EXCLUDED.date,
                has_attend = EXCLUDED.has_attend
            "#,
        )
        .bind(record.record_id)
        .bind(record.shift_id)
        .bind(record.staff_id)
        .bind(record.date)
        .bind(record.has_attend)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        // child lists are rewritten wholesale to keep their order
        for table in ["staff_bonus_salaries", "staff_punish_salaries"] {
            sqlx::query(&format!("DELETE FROM {} WHERE record_id = $1", table))
                .bind(record.record_id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }
        for (ordinal, bonus) in record.bonus_salary_list.iter().enumerate() {
            Self::insert_adjustment(
                &mut tx,
                "staff_bonus_salaries",
                record.record_id,
                ordinal,
                &bonus.name,
                bonus.value,
                bonus.multiply,
            )
            .await?;
        }
        for (ordinal, punish) in record.punish_salary_list.iter().enumerate() {
            Self::insert_adjustment(
                &mut tx,
                "staff_punish_salaries",
                record.record_id,
                ordinal,
                &punish.name,
                punish.value,
                punish.multiply,
            )
            .await?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn find_by_staff_id(&self, staff_id: Uuid) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT record_id, shift_id, staff_id, date, has_attend
            FROM shift_attendance_records
            WHERE staff_id = $1
            ORDER BY date, record_id
            "#,
        )
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        self.hydrate(rows).await
    }

    async fn find_by_staff_id_between(
        &self,
        staff_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<ShiftAttendanceRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT record_id, shift_id, staff_id, date, has_attend
            FROM shift_attendance_records
            WHERE staff_id = $1 AND date >= $2 AND date < $3
            ORDER BY date, record_id
            "#,
        )
        .bind(staff_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        self.hydrate(rows).await
    }

    async fn delete_by_staff_id(&self, staff_id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shift_attendance_records WHERE staff_id = $1")
            .bind(staff_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn delete_by_shift_id(&self, shift_id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shift_attendance_records WHERE shift_id = $1")
            .bind(shift_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }
}
