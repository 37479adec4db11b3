// SQLite Transaction Implementation

use crate::queue_store::{map_sqlx_error, EntryRow, INSERT_ENTRY_SQL, RENUMBER_WAITING_SQL, UPDATE_ENTRY_SQL};
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use waitline_core::domain::{BusinessId, EntryId, Phone, QueueEntry};
use waitline_core::error::Result;
use waitline_core::port::{QueueStoreTransaction, Transaction};

pub struct SqliteQueueTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteQueueTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteQueueTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl QueueStoreTransaction for SqliteQueueTransaction<'_> {
    async fn exists_waiting(&mut self, business_id: &BusinessId, phone: &Phone) -> Result<bool> {
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
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists != 0)
    }

    async fn count_waiting(&mut self, business_id: &BusinessId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM queue_entries WHERE business_id = ? AND status = 'waiting'",
        )
        .bind(business_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn insert(&mut self, entry: &QueueEntry) -> Result<()> {
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
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&mut self, id: &EntryId) -> Result<Option<QueueEntry>> {
        let row = sqlx::query_as::<_, EntryRow>("SELECT * FROM queue_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        row.map(EntryRow::into_entry).transpose()
    }

    async fn first_waiting(&mut self, business_id: &BusinessId) -> Result<Option<QueueEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT * FROM queue_entries
            WHERE business_id = ? AND status = 'waiting'
            ORDER BY position ASC
            LIMIT 1
            "#,
        )
        .bind(business_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        row.map(EntryRow::into_entry).transpose()
    }

    async fn update(&mut self, entry: &QueueEntry) -> Result<()> {
        sqlx::query(UPDATE_ENTRY_SQL)
            .bind(entry.position)
            .bind(entry.estimated_wait_time)
            .bind(entry.status.to_string())
            .bind(entry.called_at)
            .bind(entry.served_at)
            .bind(entry.updated_at)
            .bind(&entry.id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn renumber(&mut self, business_id: &BusinessId) -> Result<u64> {
        let result = sqlx::query(RENUMBER_WAITING_SQL)
            .bind(business_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
