// SQLite Maintenance Implementation

use crate::queue_store::{map_sqlx_error, RENUMBER_WAITING_SQL};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;
use waitline_core::error::{AppError, Result};
use waitline_core::port::{Maintenance, MaintenanceStats, TimeProvider};

/// SQLite maintenance implementation
pub struct SqliteMaintenance {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteMaintenance {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }

    /// DB file size from page count * page size
    async fn get_db_size_bytes(&self) -> Result<i64> {
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page count: {e}")))?;

        let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page size: {e}")))?;

        Ok(page_count * page_size)
    }
}

#[async_trait]
impl Maintenance for SqliteMaintenance {
    async fn vacuum(&self) -> Result<f64> {
        info!("Running VACUUM to optimize database...");

        let size_before = self.get_db_size_bytes().await? as f64 / (1024.0 * 1024.0);

        sqlx::query("VACUUM")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("VACUUM failed: {e}")))?;

        let size_after = self.get_db_size_bytes().await? as f64 / (1024.0 * 1024.0);
        let reclaimed = (size_before - size_after).max(0.0);

        info!(
            size_before_mb = size_before,
            size_after_mb = size_after,
            reclaimed_mb = reclaimed,
            "VACUUM completed"
        );

        Ok(reclaimed)
    }

    async fn gc_terminal_entries(&self, retention_days: i64) -> Result<i64> {
        let now = self.time_provider.now_millis();
        let cutoff_time = now - retention_days * 24 * 60 * 60 * 1000;

        let result = sqlx::query(
            r#"
            DELETE FROM queue_entries
            WHERE status IN ('served', 'cancelled', 'expired')
              AND updated_at < ?
            "#,
        )
        .bind(cutoff_time)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Entry GC failed: {e}")))?;

        let deleted = result.rows_affected() as i64;
        info!(
            retention_days,
            deleted_entries = deleted,
            "Terminal entry GC completed"
        );

        Ok(deleted)
    }

    async fn expire_stale_waiting(&self) -> Result<i64> {
        let now = self.time_provider.now_millis();

        // Entries past their business's client timeout. Collect the
        // affected businesses first so each queue can be renumbered after
        // the sweep.
        let stale_predicate = r#"
            status = 'waiting'
            AND created_at < ? - (
                SELECT client_timeout_minutes * 60000 FROM businesses
                WHERE businesses.id = queue_entries.business_id
            )
        "#;

        let business_ids: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT DISTINCT business_id FROM queue_entries WHERE {stale_predicate}"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if business_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(&format!(
            "UPDATE queue_entries SET status = 'expired', updated_at = ? WHERE {stale_predicate}"
        ))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        for business_id in &business_ids {
            sqlx::query(RENUMBER_WAITING_SQL)
                .bind(business_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        let expired = result.rows_affected() as i64;
        info!(
            expired_entries = expired,
            businesses = business_ids.len(),
            "Stale waiting entries expired"
        );

        Ok(expired)
    }

    async fn get_stats(&self) -> Result<MaintenanceStats> {
        let db_size_bytes = self.get_db_size_bytes().await?;

        let freelist_count: i64 = sqlx::query_scalar("PRAGMA freelist_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get freelist count: {e}")))?;

        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get page count: {e}")))?;

        let entry_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let terminal_entry_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM queue_entries WHERE status IN ('served', 'cancelled', 'expired')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let business_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM businesses")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let fragmentation_percent = if page_count > 0 {
            freelist_count as f64 / page_count as f64 * 100.0
        } else {
            0.0
        };

        Ok(MaintenanceStats {
            db_size_mb: db_size_bytes as f64 / (1024.0 * 1024.0),
            db_size_bytes,
            entry_count,
            terminal_entry_count,
            business_count,
            fragmentation_percent,
        })
    }
}
