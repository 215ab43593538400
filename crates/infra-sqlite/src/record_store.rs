// SQLite RecordStore Implementation

use async_trait::async_trait;
use mileage_core::domain::{
    Mileage, NewServiceRecord, RecordId, ServiceCategory, ServiceRecord, TaskId,
};
use mileage_core::error::{AppError, Result};
use mileage_core::port::RecordStore;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extract database-specific error code and message
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "275" | "2067" | "1555" => {
                        // CHECK / UNIQUE constraint failed
                        AppError::Database(format!(
                            "Constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "5" => {
                        // SQLITE_BUSY - database is locked
                        AppError::Database(format!(
                            "Database locked (SQLITE_BUSY): {}",
                            db_err.message()
                        ))
                    }
                    "13" => {
                        // SQLITE_FULL - database or disk is full
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}

fn to_mileage(value: i64) -> Result<Mileage> {
    Mileage::try_from(value)
        .map_err(|_| AppError::Database(format!("Stored mileage out of range: {}", value)))
}

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Scoped handle: held for one operation, returned to the pool on drop
    async fn connection(&self) -> Result<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn find_latest_by_description(&self, description: &str) -> Result<Option<Mileage>> {
        let mut conn = self.connection().await?;

        let mileage: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT mileage FROM service_records
            WHERE description = ?
            ORDER BY mileage DESC
            LIMIT 1
            "#,
        )
        .bind(description)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        mileage.map(to_mileage).transpose()
    }

    async fn find_latest_by_task(&self, task_id: TaskId) -> Result<Option<Mileage>> {
        let mut conn = self.connection().await?;

        let mileage: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT mileage FROM service_records
            WHERE task_id = ?
            ORDER BY mileage DESC
            LIMIT 1
            "#,
        )
        .bind(i64::from(task_id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        mileage.map(to_mileage).transpose()
    }

    async fn append(&self, record: &NewServiceRecord) -> Result<RecordId> {
        let mut conn = self.connection().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO service_records (mileage, date, category, description, task_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(i64::from(record.mileage))
        .bind(record.date.format("%Y-%m-%d").to_string())
        .bind(record.category.label())
        .bind(&record.description)
        .bind(record.task_id.map(i64::from))
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        debug!(record_id = id, mileage = record.mileage, "Record inserted");

        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<ServiceRecord>> {
        let mut conn = self.connection().await?;

        let rows: Vec<ServiceRecordRow> = sqlx::query_as(
            r#"
            SELECT id, mileage, date, category, description, task_id
            FROM service_records
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(ServiceRecordRow::into_record).collect()
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ServiceRecordRow {
    id: i64,
    mileage: i64,
    date: String,
    category: String,
    description: String,
    task_id: Option<i64>,
}

impl ServiceRecordRow {
    fn into_record(self) -> Result<ServiceRecord> {
        let category: ServiceCategory = self.category.parse()?;

        let task_id = self
            .task_id
            .map(|id| {
                TaskId::try_from(id)
                    .map_err(|_| AppError::Database(format!("Stored task id out of range: {}", id)))
            })
            .transpose()?;

        Ok(ServiceRecord {
            id: self.id,
            mileage: to_mileage(self.mileage)?,
            date: self.date,
            category,
            description: self.description,
            task_id,
        })
    }
}
