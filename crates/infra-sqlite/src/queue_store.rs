// SQLite QueueStore Implementation

use crate::SqliteQueueTransaction;
use async_trait::async_trait;
use sqlx::SqlitePool;
use waitline_core::domain::{BusinessId, EntryId, EntryStatus, Phone, QueueEntry};
use waitline_core::error::{AppError, Result};
use waitline_core::port::{QueueStore, QueueStoreTransaction, TransactionalQueueStore};

/// Re-derives contiguous 1..N positions for a business's waiting entries,
/// ordered by created_at ascending. Same-millisecond joins keep their
/// insertion order via the rowid tie-break; the subquery only reads
/// columns this statement never writes. One bind: the business id.
pub(crate) const RENUMBER_WAITING_SQL: &str = r#"
    UPDATE queue_entries
    SET position = (
        SELECT COUNT(*) FROM queue_entries AS prior
        WHERE prior.business_id = queue_entries.business_id
          AND prior.status = 'waiting'
          AND (prior.created_at < queue_entries.created_at
               OR (prior.created_at = queue_entries.created_at
                   AND prior.rowid <= queue_entries.rowid))
    )
    WHERE business_id = ? AND status = 'waiting'
"#;

pub(crate) const INSERT_ENTRY_SQL: &str = r#"
    INSERT INTO queue_entries (
        id, business_id, phone, client_name, position,
        estimated_wait_time, status, called_at, served_at,
        created_at, updated_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub(crate) const UPDATE_ENTRY_SQL: &str = r#"
    UPDATE queue_entries
    SET position = ?, estimated_wait_time = ?, status = ?,
        called_at = ?, served_at = ?, updated_at = ?
    WHERE id = ?
"#;

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => {
                        // UNIQUE constraint failed: the admission path
                        // reclassifies this into DuplicateEntry/QueueFull
                        AppError::Conflict(format!(
                            "Unique constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "787" | "3850" => AppError::Database(format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
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
        sqlx::Error::ColumnNotFound(col) => AppError::Database(format!("Column not found: {col}")),
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteQueueStore {
    pool: SqlitePool,
}

impl SqliteQueueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueStore for SqliteQueueStore {
    async fn insert(&self, entry: &QueueEntry) -> Result<()> {
        sqlx::query(INSERT_ENTRY_SQL)
            .bind(&entry.id)
            .bind(&entry.business_id)
            .bind(entry.phone.as_str())
            .bind(&entry.client_name)
            .bind(entry.position)
            .bind(entry.estimated_wait_time)
            .bind(entry.status.to_string())
            .bind(entry.called_at)
            .bind(entry.served_at)
            .bind(entry.created_at)
            .bind(entry.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<QueueEntry>> {
        let row = sqlx::query_as::<_, EntryRow>("SELECT * FROM queue_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(EntryRow::into_entry).transpose()
    }

    async fn update(&self, entry: &QueueEntry) -> Result<()> {
        sqlx::query(UPDATE_ENTRY_SQL)
            .bind(entry.position)
            .bind(entry.estimated_wait_time)
            .bind(entry.status.to_string())
            .bind(entry.called_at)
            .bind(entry.served_at)
            .bind(entry.updated_at)
            .bind(&entry.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn exists_waiting(&self, business_id: &BusinessId, phone: &Phone) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM queue_entries
                WHERE business_id = ? AND phone = ? AND status = 'waiting'
            )
            "#,
        )
        .bind(business_id)
        .bind(phone.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists != 0)
    }

    async fn count_waiting(&self, business_id: &BusinessId) -> Result<i64> {
        self.count_by_status(business_id, EntryStatus::Waiting).await
    }

    async fn count_by_status(&self, business_id: &BusinessId, status: EntryStatus) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM queue_entries WHERE business_id = ? AND status = ?",
        )
        .bind(business_id)
        .bind(status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn list_waiting(&self, business_id: &BusinessId) -> Result<Vec<QueueEntry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT * FROM queue_entries
            WHERE business_id = ? AND status = 'waiting'
            ORDER BY position ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(EntryRow::into_entry).collect()
    }

    async fn renumber(&self, business_id: &BusinessId) -> Result<u64> {
        let result = sqlx::query(RENUMBER_WAITING_SQL)
            .bind(business_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TransactionalQueueStore for SqliteQueueStore {
    async fn begin_transaction(&self) -> Result<Box<dyn QueueStoreTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteQueueTransaction::new(tx)))
    }
}

/// SQLite row representation of a queue entry
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EntryRow {
    id: String,
    business_id: String,
    phone: String,
    client_name: String,
    position: i64,
    estimated_wait_time: i64,
    status: String,
    called_at: Option<i64>,
    served_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl EntryRow {
    pub(crate) fn into_entry(self) -> Result<QueueEntry> {
        let status = EntryStatus::parse(&self.status).ok_or_else(|| {
            AppError::Database(format!(
                "unknown entry status '{}' for entry {}",
                self.status, self.id
            ))
        })?;

        Ok(QueueEntry {
            id: self.id,
            business_id: self.business_id,
            phone: Phone::from_trusted(self.phone),
            client_name: self.client_name,
            position: self.position,
            estimated_wait_time: self.estimated_wait_time,
            status,
            called_at: self.called_at,
            served_at: self.served_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
